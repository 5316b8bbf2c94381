pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::locator::{RegistryLocator, StaticLocator, MAPS_SERVICE, PRICING_SERVICE};
pub use adapters::store::InMemoryVehicleStore;
pub use config::CliConfig;
pub use crate::core::enrichment::Enricher;
pub use crate::core::service::VehicleService;
pub use domain::model::{EnrichedVehicle, Vehicle};
pub use utils::error::{Result, VehicleError};
