use thiserror::Error;

#[derive(Error, Debug)]
pub enum VehicleError {
    #[error("vehicle {0} not found")]
    NotFound(i64),

    #[error("validation error: {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no endpoint registered for service '{0}'")]
    ServiceUnresolved(String),

    #[error("downstream request failed: {0}")]
    Downstream(#[from] reqwest::Error),

    #[error("registry error: {message}")]
    Registry { message: String },

    #[error("missing configuration value: {field}")]
    MissingConfig { field: String },

    #[error("invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VehicleError>;
