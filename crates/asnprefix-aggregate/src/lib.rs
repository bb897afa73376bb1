//! Multi-source aggregation of announced ASN prefixes.
//!
//! [`PrefixAggregator`] queries every configured [`PrefixSource`] for an
//! ASN, unions what they return with exact string equality, and sorts the
//! result. Each call yields an [`AsnReport`] carrying both the merged list
//! and the per-source diagnostic trail.
//!
//! [`PrefixSource`]: asnprefix_client::PrefixSource

#![doc(html_root_url = "https://docs.rs/asnprefix-aggregate/0.3.0")]

mod aggregator;
mod merge;
mod report;

pub use aggregator::PrefixAggregator;
pub use merge::merge;
pub use report::{AsnReport, SourceReport};
