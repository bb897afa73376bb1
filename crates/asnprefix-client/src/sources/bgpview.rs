//! BGPView prefix lookup.

use super::PrefixSource;
use crate::PrefixClient;
use async_trait::async_trait;
use asnprefix_core::{Asn, BgpViewResponse, Prefix, PrefixError, Result, SourceResult};
use tracing::warn;

/// Adapter for `GET {bgpview}/asn/{ASN}/prefixes`
#[derive(Debug, Clone)]
pub struct BgpViewSource {
    client: PrefixClient,
}

impl BgpViewSource {
    pub(crate) fn new(client: PrefixClient) -> Self {
        Self { client }
    }

    /// IPv4 then IPv6 prefixes announced by `asn`
    pub async fn prefixes(&self, asn: &Asn) -> Result<Vec<Prefix>> {
        let url = PrefixClient::endpoint(
            &self.client.endpoints().bgpview,
            &format!("/asn/{asn}/prefixes"),
        )?;
        let response: BgpViewResponse = self.client.get_json(url).await?;

        if !response.is_ok() {
            return Err(PrefixError::UpstreamStatus {
                source_name: self.display_name().to_string(),
                status: response.status.unwrap_or_default(),
                message: response.status_message,
            });
        }

        Ok(response.prefixes())
    }
}

#[async_trait]
impl PrefixSource for BgpViewSource {
    fn name(&self) -> &'static str {
        "bgpview"
    }

    fn display_name(&self) -> &'static str {
        "BGPView"
    }

    async fn fetch(&self, asn: &Asn) -> SourceResult {
        self.prefixes(asn).await.map_or_else(
            |e| {
                warn!(source = self.name(), asn = %asn, error = %e, "lookup failed");
                SourceResult::failed(format!("Error fetching data from BGPView for {asn}: {e}"))
            },
            SourceResult::from_prefixes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Endpoints;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> BgpViewSource {
        PrefixClient::builder()
            .endpoints(Endpoints::all(server.uri()))
            .build()
            .unwrap()
            .bgpview()
    }

    #[tokio::test]
    async fn test_prefixes_both_families() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/asn/AS62419/prefixes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "status_message": "Query was successful",
                "data": {
                    "ipv4_prefixes": [{"prefix": "203.0.113.0/24", "cidr": 24}],
                    "ipv6_prefixes": [{"prefix": "2001:db8::/32", "cidr": 32}]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = source_for(&server).fetch(&Asn::normalize("62419")).await;
        let prefixes: Vec<_> = result.prefixes().iter().map(Prefix::as_str).collect();
        assert_eq!(prefixes, ["203.0.113.0/24", "2001:db8::/32"]);
    }

    #[tokio::test]
    async fn test_error_status_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "error",
                "status_message": "Malformed input"
            })))
            .mount(&server)
            .await;

        let result = source_for(&server).fetch(&Asn::normalize("AS1")).await;
        assert!(result.is_failure());
        assert_eq!(
            result.cause(),
            Some(
                "Error fetching data from BGPView for AS1: \
                 BGPView API error: status \"error\": Malformed input"
            )
        );
    }

    #[tokio::test]
    async fn test_empty_lists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "data": {"ipv4_prefixes": [], "ipv6_prefixes": []}
            })))
            .mount(&server)
            .await;

        let result = source_for(&server).fetch(&Asn::normalize("AS64512")).await;
        assert_eq!(result, SourceResult::Empty);
    }

    #[tokio::test]
    async fn test_server_error_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = source_for(&server).fetch(&Asn::normalize("AS1")).await;
        assert!(result.is_failure());
        assert!(result.prefixes().is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused_is_failure() {
        let source = PrefixClient::builder()
            .endpoints(Endpoints::all("http://127.0.0.1:1"))
            .build()
            .unwrap()
            .bgpview();

        let result = source.fetch(&Asn::normalize("AS62419")).await;
        assert!(result.is_failure());
        assert!(result.cause().unwrap().starts_with("Error fetching data from BGPView"));
    }
}
