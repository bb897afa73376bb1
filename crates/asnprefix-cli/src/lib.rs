//! # asnprefix-cli
//!
//! Command-line interface for resolving the IP prefixes announced by ASNs.
//!
//! ## Features
//!
//! - **Three sources**: BGPView, RIPEstat and the cached bgp.tools table
//! - **Partial failure tolerant**: a broken source only empties its own block
//! - **One file per ASN**: `<ASN>.txt`, sorted, one prefix per line
//! - **Output formats**: readable trail or JSON reports on stdout

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
