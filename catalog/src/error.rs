use catalog_infra::database::StorageError;
use catalog_infra::security::RateLimitRuleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogAppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid rate limit configuration: {0}")]
    RateLimit(#[from] RateLimitRuleError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CatalogAppError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CatalogAppError::Internal(err.to_string())
    }
}

impl From<String> for CatalogAppError {
    fn from(err: String) -> Self {
        CatalogAppError::Internal(err)
    }
}

pub type Result<T> = std::result::Result<T, CatalogAppError>;
