//! Product Catalog

mod errors;
mod repository;
mod service;

pub use errors::CatalogServiceError;
pub use repository::*;
pub use service::*;
