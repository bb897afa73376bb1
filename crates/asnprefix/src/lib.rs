//! Resolve the IP prefixes announced by an ASN from multiple routing-data sources.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use asnprefix::{Asn, BulkTableCache, CacheConfig, PrefixAggregator, PrefixClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> asnprefix::Result<()> {
//!     let client = PrefixClient::new()?;
//!     let cache = BulkTableCache::from_config(client.bulk_table(), &CacheConfig::default());
//!     let aggregator = PrefixAggregator::standard(&client, Arc::new(cache));
//!
//!     let report = aggregator.resolve(&Asn::normalize("AS62419")).await;
//!     print!("{report}");
//!     for prefix in &report.prefixes {
//!         println!("{prefix}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/asnprefix/0.3.0")]

// Re-export core types
pub use asnprefix_core::*;

// Re-export client, sources and cache
pub use asnprefix_client::{
    cache, sources, BgpToolsSource, BgpToolsTable, BgpViewSource, BulkTableCache, CacheConfig,
    CacheStore, ClientConfig, Clock, Endpoints, FileStore, MemoryStore, PrefixClient,
    PrefixClientBuilder, PrefixSource, RipeStatSource, SnapshotOrigin, SystemClock, TableFetcher,
    TableSnapshot,
};

// Re-export aggregation
pub use asnprefix_aggregate::{merge, AsnReport, PrefixAggregator, SourceReport};

// Re-export runtime for convenience
pub use tokio;
pub use serde;
pub use serde_json;
