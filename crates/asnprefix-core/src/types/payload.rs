//! Response shapes of the upstream routing-data sources.

use crate::Prefix;
use serde::{Deserialize, Serialize};

/// `status` value the lookup APIs use for a successful answer
pub const STATUS_OK: &str = "ok";

/// Single entry of a prefix list; only the `prefix` field is read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrefixEntry {
    /// CIDR string
    #[serde(default)]
    pub prefix: Option<String>,
}

fn collect_prefixes<'a>(entries: impl IntoIterator<Item = &'a PrefixEntry>) -> Vec<Prefix> {
    entries
        .into_iter()
        .filter_map(|entry| entry.prefix.as_deref())
        .map(Prefix::from)
        .collect()
}

/// BGPView `/asn/{asn}/prefixes` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BgpViewResponse {
    /// `"ok"` on success
    #[serde(default)]
    pub status: Option<String>,

    /// Free-form message set on errors
    #[serde(default)]
    pub status_message: Option<String>,

    /// Payload
    #[serde(default)]
    pub data: BgpViewData,
}

/// Payload of [`BgpViewResponse`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BgpViewData {
    /// IPv4 prefixes announced by the ASN
    #[serde(default)]
    pub ipv4_prefixes: Vec<PrefixEntry>,

    /// IPv6 prefixes announced by the ASN
    #[serde(default)]
    pub ipv6_prefixes: Vec<PrefixEntry>,
}

impl BgpViewResponse {
    /// Returns true if the payload carries the success sentinel
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(STATUS_OK)
    }

    /// IPv4 prefixes followed by IPv6 prefixes
    #[must_use]
    pub fn prefixes(&self) -> Vec<Prefix> {
        collect_prefixes(self.data.ipv4_prefixes.iter().chain(&self.data.ipv6_prefixes))
    }
}

/// RIPEstat `announced-prefixes` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RipeStatResponse {
    /// `"ok"` on success
    #[serde(default)]
    pub status: Option<String>,

    /// Error messages reported by the data call
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,

    /// Payload
    #[serde(default)]
    pub data: RipeStatData,
}

/// Payload of [`RipeStatResponse`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RipeStatData {
    /// Announced prefixes
    #[serde(default)]
    pub prefixes: Vec<PrefixEntry>,
}

impl RipeStatResponse {
    /// Returns true if the payload carries the success sentinel
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(STATUS_OK)
    }

    /// Text of the first message, e.g. `["error", "text"]` yields `text`
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.messages
            .iter()
            .find_map(|m| m.as_array()?.get(1)?.as_str().map(str::to_owned))
    }

    /// Announced prefixes in payload order
    #[must_use]
    pub fn prefixes(&self) -> Vec<Prefix> {
        collect_prefixes(&self.data.prefixes)
    }
}

/// One line of the bgp.tools `table.jsonl` bulk dump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRecord {
    /// Origin ASN
    #[serde(rename = "ASN", default)]
    pub asn: Option<u64>,

    /// Announced prefix
    #[serde(rename = "CIDR", default)]
    pub cidr: Option<String>,
}

impl BulkRecord {
    /// Decode a single line, returning `None` for blank or malformed lines
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        if line.trim().is_empty() {
            return None;
        }
        serde_json::from_str(line).ok()
    }

    /// The CIDR of this record if it belongs to `asn` and is non-empty
    #[must_use]
    pub fn prefix_for(&self, asn: u32) -> Option<Prefix> {
        if self.asn != Some(u64::from(asn)) {
            return None;
        }
        self.cidr
            .as_deref()
            .filter(|cidr| !cidr.is_empty())
            .map(Prefix::from)
    }
}
