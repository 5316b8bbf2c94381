use crate::domain::model::Vehicle;
use crate::domain::ports::VehicleStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory vehicle persistence keyed by identifier.
#[derive(Clone)]
pub struct InMemoryVehicleStore {
    vehicles: Arc<Mutex<HashMap<i64, Vehicle>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryVehicleStore {
    pub fn new() -> Self {
        Self {
            vehicles: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryVehicleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleStore {
    async fn find_all(&self) -> Result<Vec<Vehicle>> {
        let vehicles = self.vehicles.lock().await;
        let mut all: Vec<Vehicle> = vehicles.values().cloned().collect();
        all.sort_by_key(|v| v.id);
        Ok(all)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>> {
        let vehicles = self.vehicles.lock().await;
        Ok(vehicles.get(&id).cloned())
    }

    async fn save(&self, mut vehicle: Vehicle) -> Result<Vehicle> {
        let id = match vehicle.id {
            Some(id) => id,
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        vehicle.id = Some(id);

        let mut vehicles = self.vehicles.lock().await;
        vehicles.insert(id, vehicle.clone());
        Ok(vehicle)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut vehicles = self.vehicles.lock().await;
        vehicles.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Condition, Location, VehicleDetails};

    fn unsaved_vehicle(manufacturer: &str) -> Vehicle {
        Vehicle {
            id: None,
            condition: Condition::New,
            details: VehicleDetails {
                manufacturer: manufacturer.to_string(),
                model: "Impala".to_string(),
                year: 2020,
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

    #[tokio::test]
    async fn test_save_assigns_fresh_sequential_ids() {
        let store = InMemoryVehicleStore::new();

        let first = store.save(unsaved_vehicle("Chevrolet")).await.unwrap();
        let second = store.save(unsaved_vehicle("Ford")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_save_with_id_overwrites_existing_record() {
        let store = InMemoryVehicleStore::new();
        let saved = store.save(unsaved_vehicle("Chevrolet")).await.unwrap();

        let mut updated = saved.clone();
        updated.details.model = "Malibu".to_string();
        store.save(updated).await.unwrap();

        let found = store.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.details.model, "Malibu");
        assert_eq!(found.id, saved.id);
    }

    #[tokio::test]
    async fn test_find_all_returns_vehicles_in_id_order() {
        let store = InMemoryVehicleStore::new();
        store.save(unsaved_vehicle("Chevrolet")).await.unwrap();
        store.save(unsaved_vehicle("Ford")).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, Some(1));
        assert_eq!(all[1].id, Some(2));
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = InMemoryVehicleStore::new();
        let saved = store.save(unsaved_vehicle("Chevrolet")).await.unwrap();

        store.delete_by_id(saved.id.unwrap()).await.unwrap();
        assert!(store
            .find_by_id(saved.id.unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let store = InMemoryVehicleStore::new();
        let first = store.save(unsaved_vehicle("Chevrolet")).await.unwrap();
        store.delete_by_id(first.id.unwrap()).await.unwrap();

        let second = store.save(unsaved_vehicle("Ford")).await.unwrap();
        assert_eq!(second.id, Some(2));
    }
}
