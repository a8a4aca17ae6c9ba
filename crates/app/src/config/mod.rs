//! Application configuration

use clap::Args;

use crate::config::{
    cart::CartConfig, observability::LoggingConfig, storage::StorageConfig,
};

pub mod cart;
pub mod observability;
pub mod storage;

/// Settings shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Remote and local storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Cart and session settings.
    #[command(flatten)]
    pub cart: CartConfig,
}
