//! Site content service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, warn};
use vitrina::{fixtures::default_site_info, site::SiteInfo};

use crate::{domain::site::repository::RemoteSiteRepository, storage::LocalSlot};

#[automock]
#[async_trait]
pub trait SiteService: Send + Sync {
    /// Current site content. Never fails; falls back to the device copy and
    /// then to the built-in content.
    async fn site_info(&self) -> SiteInfo;
}

/// Site content synchronised from the remote table and cached on the device.
pub struct SiteStore {
    remote: Arc<dyn RemoteSiteRepository>,
    local: Arc<dyn LocalSlot>,
}

impl SiteStore {
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteSiteRepository>, local: Arc<dyn LocalSlot>) -> Self {
        Self { remote, local }
    }

    async fn cache(&self, info: &SiteInfo) {
        let encoded = match serde_json::to_string(info) {
            Ok(encoded) => encoded,
            Err(error) => {
                warn!(%error, "failed to encode site content");
                return;
            }
        };

        if let Err(error) = self.local.write(encoded).await {
            warn!(%error, "failed to cache site content locally");
        }
    }

    async fn read_cached(&self) -> Option<SiteInfo> {
        let raw = match self.local.read().await {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, "failed to read cached site content");
                return None;
            }
        };

        match serde_json::from_str::<SiteInfo>(&raw) {
            Ok(info) => Some(info),
            Err(error) => {
                warn!(%error, "discarding unreadable cached site content");
                None
            }
        }
    }

    async fn built_in(&self) -> SiteInfo {
        match default_site_info() {
            Ok(info) => {
                self.cache(&info).await;

                info
            }
            Err(error) => {
                warn!(%error, "built-in site content is unreadable");

                SiteInfo::default()
            }
        }
    }
}

#[async_trait]
impl SiteService for SiteStore {
    async fn site_info(&self) -> SiteInfo {
        match self.remote.find_site_info().await {
            Ok(Some(info)) => {
                debug!("loaded remote site content");
                self.cache(&info).await;

                return info;
            }
            Ok(None) => {
                debug!("no remote site content, using built-in content");

                return self.built_in().await;
            }
            Err(error) => warn!(%error, "failed to load remote site content"),
        }

        if let Some(info) = self.read_cached().await {
            debug!("loaded cached site content");

            return info;
        }

        debug!("using built-in site content");

        self.built_in().await
    }
}
