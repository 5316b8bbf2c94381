use crate::domain::model::{Endpoint, Vehicle};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Key-value persistence for vehicle records. Calls are atomic per entity;
/// there are no transactions spanning multiple records.
#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Vehicle>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>>;
    /// Persists the vehicle, assigning a fresh identifier when it has none.
    async fn save(&self, vehicle: Vehicle) -> Result<Vehicle>;
    async fn delete_by_id(&self, id: i64) -> Result<()>;
}

/// Resolves a logical service name to a currently-reachable endpoint.
///
/// `ServiceUnresolved` is the "no healthy instance" outcome; callers treat it
/// exactly like a failed request to the service itself.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn resolve(&self, service: &str) -> Result<Endpoint>;
}
