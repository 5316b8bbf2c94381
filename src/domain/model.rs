use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder price attached to a read when the pricing service cannot be
/// consulted. Downstream outages degrade the response, they never fail it.
pub const PRICE_UNAVAILABLE: &str = "unavailable";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Condition {
    New,
    Used,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetails {
    pub manufacturer: String,
    pub model: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
}

/// Persisted coordinates only. The resolved street address is a derived view
/// and lives on [`EnrichedVehicle`], never here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// Postal address resolved by the maps service for one read. Extra fields in
/// the maps response (echoed coordinates) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Quote returned by the pricing service, scoped to a single read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceQuote {
    pub currency: String,
    pub price: f64,
}

impl PriceQuote {
    pub fn display(&self) -> String {
        format!("{} {:.2}", self.currency, self.price)
    }
}

/// The persisted vehicle record. This is the single source of truth; price
/// and resolved address are never fields here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Assigned by the store on create, immutable afterwards. `None` means
    /// the vehicle has not been persisted yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub condition: Condition,
    pub details: VehicleDetails,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

/// Read view produced by the enricher: the persisted record plus the two
/// derived attributes. Only single-entity reads return this type, and it is
/// never accepted as input to a save, so transient data cannot leak back
/// into the store.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedVehicle {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// A resolved network location for a logical service name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Validate for Vehicle {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("details.manufacturer", &self.details.manufacturer)?;
        validate_non_empty_string("details.model", &self.details.model)?;
        // 1886: the Benz Patent-Motorwagen. Allow next year's models.
        validate_range(
            "details.year",
            self.details.year,
            1886,
            Utc::now().year() + 1,
        )?;
        validate_range("location.lat", self.location.lat, -90.0, 90.0)?;
        validate_range("location.lon", self.location.lon, -180.0, 180.0)?;
        Ok(())
    }
}
