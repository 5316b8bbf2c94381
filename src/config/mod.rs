pub mod file;

use crate::utils::error::{Result, VehicleError};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "vehicles-api")]
#[command(about = "Vehicle records service with price and address enrichment")]
pub struct CliConfig {
    #[arg(long, help = "Socket address to listen on")]
    pub listen: Option<String>,

    #[arg(long, help = "Registry base URL for dynamic service lookup")]
    pub registry_url: Option<String>,

    #[arg(long, help = "Static pricing service URL (bypasses the registry)")]
    pub pricing_url: Option<String>,

    #[arg(long, help = "Static maps service URL (bypasses the registry)")]
    pub maps_url: Option<String>,

    #[arg(long, help = "Per-request timeout for downstream calls, in milliseconds")]
    pub request_timeout_ms: Option<u64>,

    #[arg(long, help = "Interval between registry polls, in seconds")]
    pub registry_poll_secs: Option<u64>,

    #[arg(long, help = "TOML config file; command-line flags take precedence")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Fills in values the command line left unset.
    pub fn merge_file(&mut self, file: file::FileConfig) {
        let server = file.server.unwrap_or_default();
        let services = file.services.unwrap_or_default();

        self.listen = self.listen.take().or(server.listen);
        self.registry_url = self.registry_url.take().or(services.registry_url);
        self.pricing_url = self.pricing_url.take().or(services.pricing_url);
        self.maps_url = self.maps_url.take().or(services.maps_url);
        self.request_timeout_ms = self.request_timeout_ms.or(services.request_timeout_ms);
        self.registry_poll_secs = self.registry_poll_secs.or(services.registry_poll_secs);
    }

    pub fn listen_addr(&self) -> &str {
        self.listen.as_deref().unwrap_or("127.0.0.1:8080")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.unwrap_or(2000))
    }

    pub fn registry_poll_interval(&self) -> Duration {
        Duration::from_secs(self.registry_poll_secs.unwrap_or(30))
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.registry_url {
            validate_url("registry_url", url)?;
        } else {
            // Without a registry, both downstream addresses must be static.
            for (field, value) in [
                ("pricing_url", &self.pricing_url),
                ("maps_url", &self.maps_url),
            ] {
                if value.is_none() {
                    return Err(VehicleError::MissingConfig {
                        field: field.to_string(),
                    });
                }
            }
        }

        if let Some(url) = &self.pricing_url {
            validate_url("pricing_url", url)?;
        }
        if let Some(url) = &self.maps_url {
            validate_url("maps_url", url)?;
        }

        validate_positive_number(
            "request_timeout_ms",
            self.request_timeout_ms.unwrap_or(2000),
            1,
        )?;
        validate_positive_number(
            "registry_poll_secs",
            self.registry_poll_secs.unwrap_or(30),
            1,
        )?;
        Ok(())
    }
}
