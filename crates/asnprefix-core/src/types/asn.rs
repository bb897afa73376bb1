use crate::{PrefixError, Result};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Normalized Autonomous System Number in its textual `AS<number>` form.
///
/// Construction never fails: any token is trimmed, upper-cased and given an
/// `AS` prefix. Whether the remainder is numeric is only checked by
/// [`Asn::number`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asn(String);

impl Asn {
    /// Normalize a user-supplied ASN token
    #[must_use]
    pub fn normalize(input: &str) -> Self {
        let upper = input.trim().to_uppercase();
        if upper.starts_with("AS") {
            Self(upper)
        } else {
            Self(format!("AS{upper}"))
        }
    }

    /// The normalized textual form, e.g. `AS62419`
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bare numeric form used to match bulk-table records
    pub fn number(&self) -> Result<u32> {
        self.0
            .strip_prefix("AS")
            .unwrap_or(&self.0)
            .parse()
            .map_err(|_| PrefixError::InvalidAsn(self.0.clone()))
    }

    /// File name the aggregated prefixes of this ASN are written to
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.0)
    }
}

impl FromStr for Asn {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::normalize(s))
    }
}

impl From<&str> for Asn {
    fn from(s: &str) -> Self {
        Self::normalize(s)
    }
}

impl From<u32> for Asn {
    fn from(n: u32) -> Self {
        Self(format!("AS{n}"))
    }
}

impl AsRef<str> for Asn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Asn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
