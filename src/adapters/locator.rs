use crate::domain::model::Endpoint;
use crate::domain::ports::Locator;
use crate::utils::error::{Result, VehicleError};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use url::Url;

/// Logical name of the pricing service in the registry.
pub const PRICING_SERVICE: &str = "pricing-service";
/// Logical name of the maps/geocoding service in the registry.
pub const MAPS_SERVICE: &str = "maps-service";

/// Fixed name-to-endpoint table. Used when the registry is bypassed through
/// static configuration, and by tests that need deterministic resolution.
#[derive(Debug, Clone, Default)]
pub struct StaticLocator {
    endpoints: HashMap<String, Endpoint>,
}

impl StaticLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, service: &str, endpoint: Endpoint) -> Self {
        self.endpoints.insert(service.to_string(), endpoint);
        self
    }

    /// Registers a service under the host/port of a base URL such as
    /// `http://localhost:8082`.
    pub fn insert_url(&mut self, service: &str, url_str: &str) -> Result<()> {
        let url = Url::parse(url_str).map_err(|e| VehicleError::InvalidConfigValue {
            field: service.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        let host = url
            .host_str()
            .ok_or_else(|| VehicleError::InvalidConfigValue {
                field: service.to_string(),
                value: url_str.to_string(),
                reason: "URL has no host".to_string(),
            })?
            .to_string();
        let port = url.port_or_known_default().unwrap_or(80);
        self.endpoints.insert(service.to_string(), Endpoint { host, port });
        Ok(())
    }
}

#[async_trait]
impl Locator for StaticLocator {
    async fn resolve(&self, service: &str) -> Result<Endpoint> {
        self.endpoints
            .get(service)
            .cloned()
            .ok_or_else(|| VehicleError::ServiceUnresolved(service.to_string()))
    }
}

/// Wire shape of one registered instance in the registry listing.
#[derive(Debug, Deserialize)]
struct ServiceInstance {
    name: String,
    host: String,
    port: u16,
}

/// Registry-backed locator. A background task polls the registry's service
/// listing and swaps in a fresh endpoint table; `resolve` only ever reads
/// the last-known-good table, so a slow or dead registry never blocks a
/// request. Instance registration and heartbeating are the registry's own
/// business.
pub struct RegistryLocator {
    registry_url: String,
    client: reqwest::Client,
    table: RwLock<HashMap<String, Vec<Endpoint>>>,
    cursor: AtomicUsize,
    poll_interval: Duration,
}

impl RegistryLocator {
    /// The client is shared with the downstream adapters and already carries
    /// the per-request timeout, so registry polls are bounded like any other
    /// outbound call.
    pub fn new(registry_url: String, client: reqwest::Client, poll_interval: Duration) -> Arc<Self> {
        Arc::new(Self {
            registry_url,
            client,
            table: RwLock::new(HashMap::new()),
            cursor: AtomicUsize::new(0),
            poll_interval,
        })
    }

    /// Starts the background poll loop. The first tick fires immediately.
    pub fn spawn_poller(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let locator = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(locator.poll_interval);
            loop {
                ticker.tick().await;
                locator.refresh().await;
            }
        })
    }

    /// Fetches the registry listing and replaces the endpoint table. On any
    /// failure the previous table is kept; stale addresses beat none.
    pub async fn refresh(&self) {
        match self.fetch_table().await {
            Ok(table) => {
                tracing::debug!("registry refresh: {} service(s) known", table.len());
                if let Ok(mut current) = self.table.write() {
                    *current = table;
                }
            }
            Err(e) => {
                tracing::warn!("registry refresh failed, keeping last-known endpoints: {}", e);
            }
        }
    }

    async fn fetch_table(&self) -> Result<HashMap<String, Vec<Endpoint>>> {
        let url = format!("{}/services", self.registry_url.trim_end_matches('/'));
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(VehicleError::Registry {
                message: format!("registry returned {}", response.status()),
            });
        }

        let instances: Vec<ServiceInstance> = response.json().await?;
        let mut table: HashMap<String, Vec<Endpoint>> = HashMap::new();
        for instance in instances {
            table.entry(instance.name).or_default().push(Endpoint {
                host: instance.host,
                port: instance.port,
            });
        }
        Ok(table)
    }
}

#[async_trait]
impl Locator for RegistryLocator {
    async fn resolve(&self, service: &str) -> Result<Endpoint> {
        let table = self.table.read().map_err(|_| VehicleError::Registry {
            message: "endpoint table lock poisoned".to_string(),
        })?;

        let instances = table
            .get(service)
            .filter(|instances| !instances.is_empty())
            .ok_or_else(|| VehicleError::ServiceUnresolved(service.to_string()))?;

        // Round-robin over healthy instances; any of them will do.
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % instances.len();
        Ok(instances[index].clone())
    }
}
