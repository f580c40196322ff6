pub mod catalog_service;
pub mod error;

pub use catalog_service::{CatalogService, DefaultCatalogService};
pub use error::CatalogError;
