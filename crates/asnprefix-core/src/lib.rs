//! Core types and errors for ASN prefix resolution.
//!
//! This crate provides the foundational types used across the asnprefix workspace:
//!
//! - **Types**: [`Asn`] normalization, opaque [`Prefix`] strings, the
//!   [`PrefixSet`] union, per-source [`SourceResult`] outcomes and the
//!   upstream payload shapes
//! - **Errors**: the shared [`PrefixError`] taxonomy
//!
//! # Example
//!
//! ```rust
//! use asnprefix_core::{Asn, PrefixSet};
//!
//! let asn = Asn::normalize("  as62419 ");
//! assert_eq!(asn.as_str(), "AS62419");
//!
//! let mut set = PrefixSet::new();
//! set.insert("10.0.1.0/24");
//! set.insert("10.0.0.0/24");
//! set.insert("10.0.1.0/24");
//! assert_eq!(set.len(), 2);
//! ```

#![doc(html_root_url = "https://docs.rs/asnprefix-core/0.3.0")]

mod error;
pub mod types;

pub use error::{PrefixError, Result};
pub use types::*;
