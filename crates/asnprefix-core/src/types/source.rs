use crate::Prefix;
use serde::{Deserialize, Serialize};

/// Outcome of querying one upstream source for one ASN.
///
/// Adapters return this instead of an error so a failing source never stops
/// the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum SourceResult {
    /// The source listed at least one prefix
    Found {
        /// Prefixes in the order the source returned them
        prefixes: Vec<Prefix>,
    },
    /// The source answered but listed nothing
    Empty,
    /// The source could not be queried or answered with garbage
    Failed {
        /// Human-readable cause
        cause: String,
    },
}

impl SourceResult {
    /// Build a result from a list of prefixes, collapsing an empty list to [`SourceResult::Empty`]
    #[must_use]
    pub fn from_prefixes(prefixes: Vec<Prefix>) -> Self {
        if prefixes.is_empty() {
            Self::Empty
        } else {
            Self::Found { prefixes }
        }
    }

    /// Build a failed result from any displayable cause
    #[must_use]
    pub fn failed(cause: impl std::fmt::Display) -> Self {
        Self::Failed {
            cause: cause.to_string(),
        }
    }

    /// Prefixes contributed by this result (empty unless `Found`)
    #[must_use]
    pub fn prefixes(&self) -> &[Prefix] {
        match self {
            Self::Found { prefixes } => prefixes,
            Self::Empty | Self::Failed { .. } => &[],
        }
    }

    /// Returns true if the source could not be queried
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The failure cause, if any
    #[must_use]
    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::Failed { cause } => Some(cause),
            _ => None,
        }
    }
}

impl From<crate::Result<Vec<Prefix>>> for SourceResult {
    fn from(result: crate::Result<Vec<Prefix>>) -> Self {
        match result {
            Ok(prefixes) => Self::from_prefixes(prefixes),
            Err(e) => Self::failed(e),
        }
    }
}
