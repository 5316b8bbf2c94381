use crate::adapters::maps::MapsClient;
use crate::adapters::pricing::PriceClient;
use crate::domain::model::{EnrichedVehicle, Vehicle, PRICE_UNAVAILABLE};
use crate::domain::ports::Locator;
use std::sync::Arc;

/// Fan-out/merge orchestrator for single-vehicle reads.
///
/// Both downstream lookups run concurrently and independently; a slow or
/// failing one neither blocks nor fails the other, and neither can fail the
/// read itself. Partial success is a normal outcome. Nothing is cached:
/// price and address may legitimately change between reads, so every call
/// re-fetches both.
pub struct Enricher<L: Locator> {
    pricing: PriceClient<L>,
    maps: MapsClient<L>,
}

impl<L: Locator> Enricher<L> {
    pub fn new(client: reqwest::Client, locator: Arc<L>) -> Self {
        Self {
            pricing: PriceClient::new(client.clone(), Arc::clone(&locator)),
            maps: MapsClient::new(client, locator),
        }
    }

    /// Attaches the current price and resolved address to a persisted
    /// vehicle. Callers only enrich vehicles loaded from the store, so the
    /// identifier is present; enrichment never writes anything back.
    pub async fn enrich(&self, vehicle: Vehicle) -> EnrichedVehicle {
        let vehicle_id = vehicle.id.unwrap_or_default();

        let (quote, address) = tokio::join!(
            self.pricing.price_for(vehicle_id),
            self.maps
                .address_for(vehicle.location.lat, vehicle.location.lon),
        );

        let price = quote
            .map(|q| q.display())
            .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string());

        EnrichedVehicle {
            vehicle,
            price,
            address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::locator::{StaticLocator, MAPS_SERVICE, PRICING_SERVICE};
    use crate::domain::model::{Condition, Endpoint, Location, VehicleDetails};
    use httpmock::prelude::*;
    use std::time::Duration;

    fn persisted_vehicle() -> Vehicle {
        Vehicle {
            id: Some(1),
            condition: Condition::Used,
            details: VehicleDetails {
                manufacturer: "Chevrolet".to_string(),
                model: "Impala".to_string(),
                year: 2018,
                trim: None,
            },
            location: Location {
                lat: 40.0,
                lon: -75.0,
            },
            created_at: None,
            modified_at: None,
        }
    }

    fn enricher_for(pricing: &MockServer, maps: &MockServer) -> Enricher<StaticLocator> {
        let locator = StaticLocator::new()
            .with_endpoint(
                PRICING_SERVICE,
                Endpoint {
                    host: pricing.host(),
                    port: pricing.port(),
                },
            )
            .with_endpoint(
                MAPS_SERVICE,
                Endpoint {
                    host: maps.host(),
                    port: maps.port(),
                },
            );
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(250))
            .build()
            .unwrap();
        Enricher::new(client, Arc::new(locator))
    }

    fn mock_price(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET)
                .path("/services/price")
                .query_param("vehicleId", "1");
            then.status(200)
                .json_body(serde_json::json!({"currency": "USD", "price": 15000}));
        })
    }

    fn mock_address(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET).path("/maps");
            then.status(200).json_body(serde_json::json!({
                "street": "100 Main St",
                "city": "Philadelphia",
                "state": "PA",
                "zip": "19104"
            }));
        })
    }

    #[tokio::test]
    async fn test_enrich_merges_both_lookups() {
        let pricing = MockServer::start();
        let maps = MockServer::start();
        let price_mock = mock_price(&pricing);
        let address_mock = mock_address(&maps);

        let enriched = enricher_for(&pricing, &maps)
            .enrich(persisted_vehicle())
            .await;

        price_mock.assert();
        address_mock.assert();
        assert_eq!(enriched.price, "USD 15000.00");
        assert_eq!(enriched.address.unwrap().street, "100 Main St");
        assert_eq!(enriched.vehicle.id, Some(1));
    }

    #[tokio::test]
    async fn test_enrich_substitutes_sentinel_when_pricing_is_down() {
        let pricing = MockServer::start();
        let maps = MockServer::start();
        pricing.mock(|when, then| {
            when.method(GET).path("/services/price");
            then.status(500);
        });
        mock_address(&maps);

        let enriched = enricher_for(&pricing, &maps)
            .enrich(persisted_vehicle())
            .await;

        assert_eq!(enriched.price, PRICE_UNAVAILABLE);
        // Pricing outage does not take the address lookup down with it.
        assert_eq!(enriched.address.unwrap().city, "Philadelphia");
    }

    #[tokio::test]
    async fn test_enrich_keeps_coordinates_when_maps_is_down() {
        let pricing = MockServer::start();
        let maps = MockServer::start();
        mock_price(&pricing);
        maps.mock(|when, then| {
            when.method(GET).path("/maps");
            then.status(503);
        });

        let enriched = enricher_for(&pricing, &maps)
            .enrich(persisted_vehicle())
            .await;

        assert_eq!(enriched.price, "USD 15000.00");
        assert!(enriched.address.is_none());
        assert_eq!(enriched.vehicle.location.lat, 40.0);
        assert_eq!(enriched.vehicle.location.lon, -75.0);
    }

    #[tokio::test]
    async fn test_enrich_survives_both_services_down() {
        let pricing = MockServer::start();
        let maps = MockServer::start();
        pricing.mock(|when, then| {
            when.method(GET).path("/services/price");
            then.status(500);
        });
        maps.mock(|when, then| {
            when.method(GET).path("/maps");
            then.status(500);
        });

        let enriched = enricher_for(&pricing, &maps)
            .enrich(persisted_vehicle())
            .await;

        assert_eq!(enriched.price, PRICE_UNAVAILABLE);
        assert!(enriched.address.is_none());
    }

    #[tokio::test]
    async fn test_enrich_slow_pricing_does_not_lose_address() {
        let pricing = MockServer::start();
        let maps = MockServer::start();
        pricing.mock(|when, then| {
            when.method(GET).path("/services/price");
            then.status(200)
                .json_body(serde_json::json!({"currency": "USD", "price": 15000}))
                .delay(Duration::from_millis(750));
        });
        mock_address(&maps);

        let enriched = enricher_for(&pricing, &maps)
            .enrich(persisted_vehicle())
            .await;

        // The quote timed out, the address still made it.
        assert_eq!(enriched.price, PRICE_UNAVAILABLE);
        assert_eq!(enriched.address.unwrap().street, "100 Main St");
    }

    #[tokio::test]
    async fn test_enrich_re_fetches_on_every_call() {
        let pricing = MockServer::start();
        let maps = MockServer::start();
        let price_mock = mock_price(&pricing);
        let address_mock = mock_address(&maps);

        let enricher = enricher_for(&pricing, &maps);
        enricher.enrich(persisted_vehicle()).await;
        enricher.enrich(persisted_vehicle()).await;

        price_mock.assert_hits(2);
        address_mock.assert_hits(2);
    }
}
