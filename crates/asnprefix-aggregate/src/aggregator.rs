//! Orchestration of the prefix sources for one or many ASNs.

use crate::report::{AsnReport, SourceReport};
use asnprefix_client::{BgpToolsSource, BulkTableCache, PrefixClient, PrefixSource};
use asnprefix_core::Asn;
use futures_util::stream::{self, Stream, StreamExt};
use std::sync::Arc;
use tracing::{debug, info};

/// Builder-style aggregator over any number of [`PrefixSource`]s
#[derive(Clone)]
pub struct PrefixAggregator {
    sources: Vec<Arc<dyn PrefixSource>>,
    jobs: usize,
}

impl Default for PrefixAggregator {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            jobs: 1,
        }
    }
}

impl std::fmt::Debug for PrefixAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefixAggregator")
            .field("sources", &self.source_names())
            .field("jobs", &self.jobs)
            .finish()
    }
}

impl PrefixAggregator {
    /// Create an aggregator with no sources
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// BGPView, RIPEstat and the bgp.tools bulk table, in that order
    #[must_use]
    pub fn standard(client: &PrefixClient, cache: Arc<BulkTableCache>) -> Self {
        Self::new()
            .with_source(client.bgpview())
            .with_source(client.ripestat())
            .with_source(BgpToolsSource::new(cache))
    }

    /// Add a source
    #[must_use]
    pub fn with_source(mut self, source: impl PrefixSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Number of ASNs resolved concurrently by [`Self::stream`] (at least 1)
    #[must_use]
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Identifiers of the configured sources
    #[must_use]
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Query every source for `asn` concurrently and merge the results
    pub async fn resolve(&self, asn: &Asn) -> AsnReport {
        info!(asn = %asn, sources = self.sources.len(), "resolving prefixes");

        let queries = self.sources.iter().map(|source| async move {
            SourceReport {
                source: source.name(),
                display_name: source.display_name(),
                result: source.fetch(asn).await,
            }
        });
        let reports = futures_util::future::join_all(queries).await;

        let report = AsnReport::new(asn.clone(), reports);
        debug!(
            asn = %asn,
            prefixes = report.prefixes.len(),
            failed_sources = report.failed_sources(),
            "merged prefixes"
        );
        report
    }

    /// Resolve several ASNs, up to `jobs` at a time, yielding reports in
    /// input order
    pub fn stream<'a>(&'a self, asns: &'a [Asn]) -> impl Stream<Item = AsnReport> + 'a {
        stream::iter(asns)
            .map(move |asn| self.resolve(asn))
            .buffered(self.jobs)
    }

    /// Resolve several ASNs and collect the reports in input order
    pub async fn resolve_many(&self, asns: &[Asn]) -> Vec<AsnReport> {
        self.stream(asns).collect().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asnprefix_client::{Endpoints, MemoryStore};
    use asnprefix_core::{Prefix, SourceResult};
    use async_trait::async_trait;
    use std::time::Duration;

    struct StaticSource {
        name: &'static str,
        result: SourceResult,
        delay: Duration,
    }

    impl StaticSource {
        fn found(name: &'static str, prefixes: &[&str]) -> Self {
            Self {
                name,
                result: SourceResult::from_prefixes(
                    prefixes.iter().copied().map(Prefix::from).collect(),
                ),
                delay: Duration::ZERO,
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                result: SourceResult::failed("connection refused"),
                delay: Duration::ZERO,
            }
        }
    }

    #[async_trait]
    impl PrefixSource for StaticSource {
        fn name(&self) -> &'static str {
            self.name
        }

        fn display_name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self, _asn: &Asn) -> SourceResult {
            tokio::time::sleep(self.delay).await;
            self.result.clone()
        }
    }

    /// Answers slower for lower ASNs so completion order is reversed
    struct SlowForLowAsn;

    #[async_trait]
    impl PrefixSource for SlowForLowAsn {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn display_name(&self) -> &'static str {
            "Slow"
        }

        async fn fetch(&self, asn: &Asn) -> SourceResult {
            let n = u64::from(asn.number().unwrap_or(0));
            tokio::time::sleep(Duration::from_millis(60u64.saturating_sub(n * 15))).await;
            SourceResult::from_prefixes(vec![Prefix::new(format!("10.{n}.0.0/16"))])
        }
    }

    fn prefixes(report: &AsnReport) -> Vec<&str> {
        report.prefixes.iter().map(Prefix::as_str).collect()
    }

    #[tokio::test]
    async fn test_dedup_example() {
        let aggregator = PrefixAggregator::new()
            .with_source(StaticSource::found("A", &["10.0.0.0/24"]))
            .with_source(StaticSource::found("B", &["10.0.0.0/24", "10.0.1.0/24"]))
            .with_source(StaticSource::found("C", &[]));

        let report = aggregator.resolve(&Asn::normalize("AS62419")).await;
        assert_eq!(prefixes(&report), ["10.0.0.0/24", "10.0.1.0/24"]);
        assert_eq!(report.sources.len(), 3);
        assert_eq!(report.sources[2].result, SourceResult::Empty);
    }

    #[tokio::test]
    async fn test_source_order_does_not_matter() {
        let forward = PrefixAggregator::new()
            .with_source(StaticSource::found("A", &["203.0.113.0/24"]))
            .with_source(StaticSource::found("B", &["198.51.100.0/24", "203.0.113.0/24"]));
        let backward = PrefixAggregator::new()
            .with_source(StaticSource::found("B", &["198.51.100.0/24", "203.0.113.0/24"]))
            .with_source(StaticSource::found("A", &["203.0.113.0/24"]));

        let asn = Asn::normalize("62419");
        assert_eq!(
            forward.resolve(&asn).await.prefixes,
            backward.resolve(&asn).await.prefixes
        );
    }

    #[tokio::test]
    async fn test_failing_sources_do_not_block_others() {
        let aggregator = PrefixAggregator::new()
            .with_source(StaticSource::failing("A"))
            .with_source(StaticSource::found("B", &["198.51.100.0/24"]))
            .with_source(StaticSource::failing("C"));

        let report = aggregator.resolve(&Asn::normalize("AS62419")).await;
        assert_eq!(prefixes(&report), ["198.51.100.0/24"]);
        assert_eq!(report.failed_sources(), 2);
    }

    #[tokio::test]
    async fn test_all_sources_failing_is_empty_not_error() {
        let aggregator = PrefixAggregator::new()
            .with_source(StaticSource::failing("A"))
            .with_source(StaticSource::failing("B"))
            .with_source(StaticSource::failing("C"));

        let report = aggregator.resolve(&Asn::normalize("AS62419")).await;
        assert!(report.prefixes.is_empty());
        assert_eq!(report.failed_sources(), 3);
    }

    #[tokio::test]
    async fn test_sources_run_concurrently() {
        let slow = |name| StaticSource {
            delay: Duration::from_millis(200),
            ..StaticSource::found(name, &["10.0.0.0/24"])
        };
        let aggregator = PrefixAggregator::new()
            .with_source(slow("A"))
            .with_source(slow("B"))
            .with_source(slow("C"));

        let started = std::time::Instant::now();
        aggregator.resolve(&Asn::normalize("AS1")).await;
        assert!(started.elapsed() < Duration::from_millis(550));
    }

    #[tokio::test]
    async fn test_resolve_many_keeps_input_order() {
        let aggregator = PrefixAggregator::new().with_source(SlowForLowAsn).jobs(4);
        let asns: Vec<Asn> = ["AS1", "AS2", "AS3", "AS4"].into_iter().map(Asn::from).collect();

        let reports = aggregator.resolve_many(&asns).await;
        let order: Vec<_> = reports.iter().map(|r| r.asn.to_string()).collect();
        assert_eq!(order, ["AS1", "AS2", "AS3", "AS4"]);
        assert_eq!(prefixes(&reports[2]), ["10.3.0.0/16"]);
    }

    #[test]
    fn test_jobs_at_least_one() {
        let aggregator = PrefixAggregator::new().jobs(0);
        assert_eq!(aggregator.jobs, 1);
    }

    #[tokio::test]
    async fn test_standard_sources() {
        let client = PrefixClient::builder()
            .endpoints(Endpoints::all("http://127.0.0.1:1"))
            .build()
            .unwrap();
        let cache = Arc::new(BulkTableCache::new(client.bulk_table(), MemoryStore::new()));
        let aggregator = PrefixAggregator::standard(&client, cache);
        assert_eq!(aggregator.source_names(), ["bgpview", "ripestat", "bgptools"]);

        // Every upstream is unreachable: still a report, just an empty one
        let report = aggregator.resolve(&Asn::normalize("AS62419")).await;
        assert!(report.prefixes.is_empty());
        assert_eq!(report.failed_sources(), 3);
    }
}
