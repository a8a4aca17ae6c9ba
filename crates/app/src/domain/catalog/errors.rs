//! Catalog service errors.

use thiserror::Error;
use vitrina::products::ProductId;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("product {0} not found")]
    NotFound(ProductId),
}
