//! Catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, warn};
use vitrina::{
    fixtures::default_catalog,
    products::{Product, ProductId},
};

use crate::{
    domain::catalog::{errors::CatalogServiceError, repository::RemoteCatalogRepository},
    storage::LocalSlot,
};

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Every purchasable product. Never fails; falls back to the device copy
    /// and then to the built-in catalog.
    async fn list_products(&self) -> Vec<Product>;

    /// Look up one product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::NotFound`] when no product has `id`.
    async fn get_product(&self, id: &ProductId) -> Result<Product, CatalogServiceError>;
}

/// Catalog synchronised from the remote table and cached on the device.
pub struct CatalogStore {
    remote: Arc<dyn RemoteCatalogRepository>,
    local: Arc<dyn LocalSlot>,
}

impl CatalogStore {
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteCatalogRepository>, local: Arc<dyn LocalSlot>) -> Self {
        Self { remote, local }
    }

    async fn cache(&self, products: &[Product]) {
        let encoded = match serde_json::to_string(products) {
            Ok(encoded) => encoded,
            Err(error) => {
                warn!(%error, "failed to encode catalog");
                return;
            }
        };

        if let Err(error) = self.local.write(encoded).await {
            warn!(%error, "failed to cache catalog locally");
        }
    }

    async fn read_cached(&self) -> Option<Vec<Product>> {
        let raw = match self.local.read().await {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, "failed to read cached catalog");
                return None;
            }
        };

        match serde_json::from_str::<Vec<Product>>(&raw) {
            Ok(products) => Some(products),
            Err(error) => {
                warn!(%error, "discarding unreadable cached catalog");
                None
            }
        }
    }
}

#[async_trait]
impl CatalogService for CatalogStore {
    async fn list_products(&self) -> Vec<Product> {
        match self.remote.list_products().await {
            Ok(products) if !products.is_empty() => {
                debug!(count = products.len(), "loaded remote catalog");
                self.cache(&products).await;

                return products;
            }
            Ok(_) => debug!("remote catalog is empty"),
            Err(error) => warn!(%error, "failed to load remote catalog"),
        }

        if let Some(products) = self.read_cached().await {
            debug!(count = products.len(), "loaded cached catalog");

            return products;
        }

        match default_catalog() {
            Ok(products) => {
                debug!(count = products.len(), "using built-in catalog");
                self.cache(&products).await;

                products
            }
            Err(error) => {
                warn!(%error, "built-in catalog is unreadable");

                Vec::new()
            }
        }
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, CatalogServiceError> {
        self.list_products()
            .await
            .into_iter()
            .find(|product| product.id == *id)
            .ok_or_else(|| CatalogServiceError::NotFound(id.clone()))
    }
}
