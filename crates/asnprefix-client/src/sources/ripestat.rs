//! RIPEstat announced-prefixes data call.

use super::PrefixSource;
use crate::PrefixClient;
use async_trait::async_trait;
use asnprefix_core::{Asn, Prefix, PrefixError, Result, RipeStatResponse, SourceResult};
use tracing::warn;

/// Adapter for `GET {ripestat}/data/announced-prefixes/data.json?resource={ASN}`
#[derive(Debug, Clone)]
pub struct RipeStatSource {
    client: PrefixClient,
}

impl RipeStatSource {
    pub(crate) fn new(client: PrefixClient) -> Self {
        Self { client }
    }

    /// Prefixes announced by `asn`
    pub async fn prefixes(&self, asn: &Asn) -> Result<Vec<Prefix>> {
        let mut url = PrefixClient::endpoint(
            &self.client.endpoints().ripestat,
            "/data/announced-prefixes/data.json",
        )?;
        url.query_pairs_mut().append_pair("resource", asn.as_str());

        let response: RipeStatResponse = self.client.get_json(url).await?;

        if !response.is_ok() {
            return Err(PrefixError::UpstreamStatus {
                source_name: self.display_name().to_string(),
                message: response.message(),
                status: response.status.unwrap_or_default(),
            });
        }

        Ok(response.prefixes())
    }
}

#[async_trait]
impl PrefixSource for RipeStatSource {
    fn name(&self) -> &'static str {
        "ripestat"
    }

    fn display_name(&self) -> &'static str {
        "RIPEstat"
    }

    async fn fetch(&self, asn: &Asn) -> SourceResult {
        self.prefixes(asn).await.map_or_else(
            |e| {
                warn!(source = self.name(), asn = %asn, error = %e, "lookup failed");
                SourceResult::failed(format!("Error fetching data from RIPEstat for {asn}: {e}"))
            },
            SourceResult::from_prefixes,
        )
    }
}
