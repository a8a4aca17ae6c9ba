//! Storage Config

use std::path::PathBuf;

use clap::Args;

const CART_FILE: &str = "cart.json";
const CATALOG_FILE: &str = "products.json";
const SESSION_FILE: &str = "session";
const SITE_FILE: &str = "site.json";

/// Storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// `PostgreSQL` connection string; the remote tier is offline without it
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Directory holding the device-local copies
    #[arg(long, env = "VITRINA_DATA_DIR", default_value = ".vitrina")]
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Local copy of the cart.
    #[must_use]
    pub fn cart_path(&self) -> PathBuf {
        self.data_dir.join(CART_FILE)
    }

    /// Local copy of the catalog.
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(CATALOG_FILE)
    }

    /// Signed-in e-mail remembered between invocations.
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }

    /// Local copy of the site content.
    #[must_use]
    pub fn site_path(&self) -> PathBuf {
        self.data_dir.join(SITE_FILE)
    }
}
