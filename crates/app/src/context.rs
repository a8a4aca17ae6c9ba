//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    database,
    domain::{
        carts::{CartStore, PgRemoteCartsRepository, RemoteCartsRepository},
        catalog::{CatalogService, CatalogStore, PgCatalogRepository, RemoteCatalogRepository},
        site::{PgSiteRepository, RemoteSiteRepository, SiteService, SiteStore},
    },
    identity::{Identity, Session, SessionError},
    storage::{FileSlot, LocalSlot, Offline},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("invalid signed-in user")]
    Session(#[from] SessionError),
}

/// Services of one storefront session.
pub struct AppContext {
    pub session: Session,
    pub catalog: Arc<dyn CatalogService>,
    pub site: Arc<dyn SiteService>,
    pub carts: CartStore,
    signed_in: Arc<dyn LocalSlot>,
}

impl AppContext {
    /// Build the services and load the cart of the signed-in user.
    ///
    /// The user is the configured one, or else the one remembered from the
    /// last sign-in on this device. Without a database URL the remote tier
    /// is offline and only the device-local copies are used.
    ///
    /// # Errors
    ///
    /// Returns an error when a configured database cannot be reached or the
    /// signed-in user is blank.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let (remote_carts, remote_catalog, remote_site): (
            Arc<dyn RemoteCartsRepository>,
            Arc<dyn RemoteCatalogRepository>,
            Arc<dyn RemoteSiteRepository>,
        ) = match &config.storage.database_url {
            Some(url) => {
                let pool = database::connect(url)
                    .await
                    .map_err(AppInitError::Database)?;

                (
                    Arc::new(PgRemoteCartsRepository::new(pool.clone())),
                    Arc::new(PgCatalogRepository::new(pool.clone())),
                    Arc::new(PgSiteRepository::new(pool)),
                )
            }
            None => {
                info!("no database configured, remote storage is offline");

                (Arc::new(Offline), Arc::new(Offline), Arc::new(Offline))
            }
        };

        let signed_in: Arc<dyn LocalSlot> = Arc::new(FileSlot::new(config.storage.session_path()));

        let session = Session::new(&config.cart.admin_emails);

        let user = match &config.cart.user {
            Some(email) => Some(email.clone()),
            None => remembered_user(signed_in.as_ref()).await,
        };

        if let Some(email) = user {
            session.sign_in(&email)?;
        }

        let catalog = CatalogStore::new(
            remote_catalog,
            Arc::new(FileSlot::new(config.storage.catalog_path())),
        );

        let site = SiteStore::new(
            remote_site,
            Arc::new(FileSlot::new(config.storage.site_path())),
        );

        let carts = CartStore::new(
            remote_carts,
            Arc::new(FileSlot::new(config.storage.cart_path())),
            config.cart.merge_policy,
        );

        carts.load(session.current()).await;

        Ok(Self {
            session,
            catalog: Arc::new(catalog),
            site: Arc::new(site),
            carts,
            signed_in,
        })
    }

    /// Sign in, remember the user on this device and adopt their cart.
    ///
    /// # Errors
    ///
    /// Returns an error if `email` is blank.
    pub async fn sign_in(&self, email: &str) -> Result<Identity, SessionError> {
        let identity = self.session.sign_in(email)?;

        if let Some(email) = identity.email()
            && let Err(error) = self.signed_in.write(email.to_owned()).await
        {
            warn!(%error, "failed to remember signed-in user");
        }

        self.carts.switch_identity(identity.clone()).await;

        Ok(identity)
    }

    /// Sign out, forget the remembered user and empty the cart.
    pub async fn sign_out(&self) {
        self.session.sign_out();

        if let Err(error) = self.signed_in.clear().await {
            warn!(%error, "failed to forget signed-in user");
        }

        self.carts.switch_identity(Identity::Guest).await;
    }

    /// Apply pending writes.
    pub async fn shutdown(self) {
        self.carts.close().await;
    }
}

async fn remembered_user(slot: &dyn LocalSlot) -> Option<String> {
    match slot.read().await {
        Ok(email) => email.filter(|email| !email.trim().is_empty()),
        Err(error) => {
            warn!(%error, "failed to read remembered user");
            None
        }
    }
}
