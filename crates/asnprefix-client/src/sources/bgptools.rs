//! bgp.tools bulk table: download and per-ASN scan.

use super::PrefixSource;
use crate::cache::{BulkTableCache, SnapshotOrigin, TableFetcher};
use crate::PrefixClient;
use async_trait::async_trait;
use asnprefix_core::{Asn, BulkRecord, Prefix, Result, SourceResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// Downloads `{bgptools}/table.jsonl` with a browser User-Agent
#[derive(Debug, Clone)]
pub struct BgpToolsTable {
    client: PrefixClient,
}

impl BgpToolsTable {
    pub(crate) fn new(client: PrefixClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableFetcher for BgpToolsTable {
    async fn fetch_table(&self) -> Result<String> {
        let config = self.client.config();
        let url = PrefixClient::endpoint(&config.endpoints.bgptools, "/table.jsonl")?;
        self.client
            .get_text(url, config.bulk_timeout, Some(&config.bulk_user_agent))
            .await
    }
}

/// Collect the prefixes of `asn` from raw bulk table lines.
///
/// Blank and undecodable lines are skipped; the dump occasionally contains
/// malformed rows.
pub fn scan_table<S: AsRef<str>>(lines: &[S], asn: u32) -> Vec<Prefix> {
    lines
        .iter()
        .filter_map(|line| BulkRecord::parse_line(line.as_ref()))
        .filter_map(|record| record.prefix_for(asn))
        .collect()
}

/// Adapter answering from the cached bulk table; performs no request of its own
#[derive(Debug, Clone)]
pub struct BgpToolsSource {
    cache: Arc<BulkTableCache>,
}

impl BgpToolsSource {
    /// Create an adapter reading from `cache`
    #[must_use]
    pub fn new(cache: Arc<BulkTableCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl PrefixSource for BgpToolsSource {
    fn name(&self) -> &'static str {
        "bgptools"
    }

    fn display_name(&self) -> &'static str {
        "bgp.tools"
    }

    async fn fetch(&self, asn: &Asn) -> SourceResult {
        let number = match asn.number() {
            Ok(n) => n,
            Err(e) => {
                warn!(source = self.name(), error = %e, "skipping bulk table scan");
                return SourceResult::failed(format!("Invalid ASN format: {asn}"));
            }
        };

        let snapshot = self.cache.snapshot().await;
        if snapshot.origin() == SnapshotOrigin::Unavailable {
            return SourceResult::failed("Error fetching bgp.tools data: no table available");
        }

        let prefixes = scan_table(snapshot.lines(), number);
        debug!(
            asn = %asn,
            lines = snapshot.len(),
            origin = %snapshot.origin(),
            found = prefixes.len(),
            "scanned bulk table"
        );
        SourceResult::from_prefixes(prefixes)
    }
}
