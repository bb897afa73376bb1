//! HTTP source adapters and bulk table cache for ASN prefix resolution.
//!
//! This crate provides the shared [`PrefixClient`], the three
//! [`PrefixSource`] adapters built on it and the [`BulkTableCache`] that
//! backs the bgp.tools adapter.

#![doc(html_root_url = "https://docs.rs/asnprefix-client/0.3.0")]

mod client;
mod config;
pub mod cache;
pub mod sources;

pub use cache::{
    BulkTableCache, CacheStore, Clock, FileStore, MemoryStore, SnapshotOrigin, SystemClock,
    TableFetcher, TableSnapshot,
};
pub use client::{PrefixClient, PrefixClientBuilder};
pub use config::*;
pub use sources::{BgpToolsSource, BgpToolsTable, BgpViewSource, PrefixSource, RipeStatSource};
pub use asnprefix_core::{PrefixError, Result};
