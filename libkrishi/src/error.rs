//! Error types for KrishiMitra

use thiserror::Error;

pub type Result<T> = std::result::Result<T, KrishiError>;

#[derive(Error, Debug)]
pub enum KrishiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl KrishiError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            KrishiError::InvalidInput(_) => 3,
            KrishiError::Session(_) => 2,
            KrishiError::Config(_) => 1,
            KrishiError::Catalog(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Raised when the store is used outside of a live session.
///
/// This is a programming error in the caller, never a condition to retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("store accessed outside of an active session")]
    Inactive,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog is missing {0}")]
    Missing(String),
}
