use crate::utils::error::{Result, VehicleError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TOML file configuration, merged underneath command-line flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerSection>,
    pub services: Option<ServicesSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub listen: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicesSection {
    pub registry_url: Option<String>,
    pub pricing_url: Option<String>,
    pub maps_url: Option<String>,
    pub request_timeout_ms: Option<u64>,
    pub registry_poll_secs: Option<u64>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| VehicleError::InvalidConfigValue {
            field: "config".to_string(),
            value: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
