use crate::adapters::locator::MAPS_SERVICE;
use crate::domain::model::Address;
use crate::domain::ports::Locator;
use crate::utils::error::Result;
use std::sync::Arc;

/// Client for the maps/geocoding service. Takes raw coordinates, returns a
/// postal address. The coordinates themselves are never modified here; on
/// failure the caller keeps them as-is.
pub struct MapsClient<L: Locator> {
    client: reqwest::Client,
    locator: Arc<L>,
}

impl<L: Locator> MapsClient<L> {
    pub fn new(client: reqwest::Client, locator: Arc<L>) -> Self {
        Self { client, locator }
    }

    /// Resolves the address for a coordinate pair, or `None` on any failure.
    /// Same absorption contract as the price client.
    pub async fn address_for(&self, lat: f64, lon: f64) -> Option<Address> {
        match self.try_fetch(lat, lon).await {
            Ok(address) => Some(address),
            Err(e) => {
                tracing::warn!("address lookup for ({}, {}) failed: {}", lat, lon, e);
                None
            }
        }
    }

    async fn try_fetch(&self, lat: f64, lon: f64) -> Result<Address> {
        let endpoint = self.locator.resolve(MAPS_SERVICE).await?;
        let url = format!("{}/maps", endpoint.base_url());

        tracing::debug!("requesting address for ({}, {}) from {}", lat, lon, url);
        let response = self
            .client
            .get(&url)
            .query(&[("lat", lat), ("lon", lon)])
            .send()
            .await?
            .error_for_status()?;

        let address = response.json::<Address>().await?;
        Ok(address)
    }
}
