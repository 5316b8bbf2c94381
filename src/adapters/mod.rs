// Adapters layer: concrete implementations for external systems (service
// registry, pricing and maps HTTP clients, vehicle persistence).

pub mod locator;
pub mod maps;
pub mod pricing;
pub mod store;
