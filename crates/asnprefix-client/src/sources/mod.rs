//! Source adapters, one per upstream routing-data source.

mod bgptools;
mod bgpview;
mod ripestat;

pub use bgptools::{scan_table, BgpToolsSource, BgpToolsTable};
pub use bgpview::BgpViewSource;
pub use ripestat::RipeStatSource;

use async_trait::async_trait;
use asnprefix_core::{Asn, SourceResult};
use std::sync::Arc;

/// An upstream that can list the prefixes announced by an ASN.
///
/// Implementations never return an error: every failure is folded into
/// [`SourceResult::Failed`] so one broken source cannot abort the others.
#[async_trait]
pub trait PrefixSource: Send + Sync {
    /// Short identifier (e.g. `"bgpview"`)
    fn name(&self) -> &'static str;

    /// Human-readable name (e.g. `"BGPView"`)
    fn display_name(&self) -> &'static str;

    /// Query the source for `asn`
    async fn fetch(&self, asn: &Asn) -> SourceResult;
}

#[async_trait]
impl<T: PrefixSource + ?Sized> PrefixSource for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn display_name(&self) -> &'static str {
        (**self).display_name()
    }

    async fn fetch(&self, asn: &Asn) -> SourceResult {
        (**self).fetch(asn).await
    }
}
