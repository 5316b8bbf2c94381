use crate::adapters::locator::PRICING_SERVICE;
use crate::domain::model::PriceQuote;
use crate::domain::ports::Locator;
use crate::utils::error::Result;
use std::sync::Arc;

/// Client for the pricing service. Every lookup re-resolves the service
/// endpoint and re-fetches the quote; prices are never cached.
pub struct PriceClient<L: Locator> {
    client: reqwest::Client,
    locator: Arc<L>,
}

impl<L: Locator> PriceClient<L> {
    pub fn new(client: reqwest::Client, locator: Arc<L>) -> Self {
        Self { client, locator }
    }

    /// Fetches the current quote for a vehicle. Resolution failures,
    /// transport errors, timeouts, non-2xx statuses and malformed bodies all
    /// collapse to `None`; pricing outages must never fail the caller's read.
    pub async fn price_for(&self, vehicle_id: i64) -> Option<PriceQuote> {
        match self.try_fetch(vehicle_id).await {
            Ok(quote) => Some(quote),
            Err(e) => {
                tracing::warn!("price lookup for vehicle {} failed: {}", vehicle_id, e);
                None
            }
        }
    }

    async fn try_fetch(&self, vehicle_id: i64) -> Result<PriceQuote> {
        let endpoint = self.locator.resolve(PRICING_SERVICE).await?;
        let url = format!("{}/services/price", endpoint.base_url());

        tracing::debug!("requesting price for vehicle {} from {}", vehicle_id, url);
        let response = self
            .client
            .get(&url)
            .query(&[("vehicleId", vehicle_id)])
            .send()
            .await?
            .error_for_status()?;

        let quote = response.json::<PriceQuote>().await?;
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::locator::StaticLocator;
    use crate::domain::model::Endpoint;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn client_for(server: &MockServer) -> PriceClient<StaticLocator> {
        let locator = StaticLocator::new().with_endpoint(
            PRICING_SERVICE,
            Endpoint {
                host: server.host(),
                port: server.port(),
            },
        );
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(250))
            .build()
            .unwrap();
        PriceClient::new(http, Arc::new(locator))
    }

    #[tokio::test]
    async fn test_price_for_parses_quote() {
        let server = MockServer::start();
        let price_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/services/price")
                .query_param("vehicleId", "1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"currency": "USD", "price": 15000}));
        });

        let quote = client_for(&server).price_for(1).await.unwrap();

        price_mock.assert();
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.display(), "USD 15000.00");
    }

    #[tokio::test]
    async fn test_price_for_absorbs_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/services/price");
            then.status(500);
        });

        assert!(client_for(&server).price_for(1).await.is_none());
    }

    #[tokio::test]
    async fn test_price_for_absorbs_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/services/price");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("{\"totally\": \"unrelated\"}");
        });

        assert!(client_for(&server).price_for(1).await.is_none());
    }

    #[tokio::test]
    async fn test_price_for_absorbs_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/services/price");
            then.status(200)
                .json_body(serde_json::json!({"currency": "USD", "price": 1.0}))
                .delay(Duration::from_millis(750));
        });

        assert!(client_for(&server).price_for(1).await.is_none());
    }

    #[tokio::test]
    async fn test_price_for_absorbs_unresolved_service() {
        let locator = StaticLocator::new();
        let client = PriceClient::new(reqwest::Client::new(), Arc::new(locator));

        assert!(client.price_for(1).await.is_none());
    }
}
