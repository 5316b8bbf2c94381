pub mod enrichment;
pub mod service;

pub use crate::domain::model::{EnrichedVehicle, Vehicle};
pub use crate::domain::ports::{Locator, VehicleStore};
pub use crate::utils::error::Result;
