pub mod error;
pub mod extension;
pub mod manager;
pub mod repository;

#[cfg(test)]
mod tests;

pub use error::StorageError;
pub use manager::{DatabaseManager, DatabaseSettings};
pub use repository::{ExtensionRepository, SeaOrmExtensionRepository};
