use crate::core::enrichment::Enricher;
use crate::domain::model::{EnrichedVehicle, Vehicle};
use crate::domain::ports::{Locator, VehicleStore};
use crate::utils::error::{Result, VehicleError};
use chrono::Utc;

/// Create, read, update and delete vehicle records, gathering related price
/// and address data on single-entity reads.
///
/// Only `NotFound` (and upstream validation errors) ever escape this layer;
/// downstream-service failures are absorbed inside the enricher.
pub struct VehicleService<S: VehicleStore, L: Locator> {
    store: S,
    enricher: Enricher<L>,
}

impl<S: VehicleStore, L: Locator> VehicleService<S, L> {
    pub fn new(store: S, enricher: Enricher<L>) -> Self {
        Self { store, enricher }
    }

    /// All persisted vehicles, unenriched.
    pub async fn list(&self) -> Result<Vec<Vehicle>> {
        self.store.find_all().await
    }

    /// One vehicle with its current price and resolved address. Always
    /// succeeds when the vehicle exists, whatever the downstream weather.
    pub async fn get(&self, id: i64) -> Result<EnrichedVehicle> {
        let vehicle = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(VehicleError::NotFound(id))?;

        Ok(self.enricher.enrich(vehicle).await)
    }

    /// Creates or updates, based on whether the vehicle carries an id.
    /// Updates replace details, location and condition only; identifier and
    /// creation timestamp are server-owned and untouched. Returns the
    /// persisted, unenriched record.
    pub async fn save(&self, vehicle: Vehicle) -> Result<Vehicle> {
        match vehicle.id {
            Some(id) => {
                let mut existing = self
                    .store
                    .find_by_id(id)
                    .await?
                    .ok_or(VehicleError::NotFound(id))?;

                existing.details = vehicle.details;
                existing.location = vehicle.location;
                existing.condition = vehicle.condition;
                existing.modified_at = Some(Utc::now());

                tracing::info!("updating vehicle {}", id);
                self.store.save(existing).await
            }
            None => {
                let mut vehicle = vehicle;
                let now = Utc::now();
                vehicle.created_at = Some(now);
                vehicle.modified_at = Some(now);

                let saved = self.store.save(vehicle).await?;
                tracing::info!("created vehicle {:?}", saved.id);
                Ok(saved)
            }
        }
    }

    /// Removes a vehicle, or `NotFound` if it was never there.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(VehicleError::NotFound(id))?;

        tracing::info!("deleting vehicle {}", id);
        self.store.delete_by_id(id).await
    }
}
