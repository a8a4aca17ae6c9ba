use clap::{Parser, Subcommand};
use vitrina_app::{config::AppConfig, context::AppContext, observability};

mod cart;
mod catalog;
mod db;
mod site;

#[derive(Debug, Parser)]
#[command(name = "vitrina", about = "Vitrina storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Catalog(catalog::CatalogCommand),
    Cart(cart::CartCommand),
    Site(site::SiteCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_logging(&self.config.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Catalog(command) => {
                let context = open(&self.config).await?;
                let result = catalog::run(&context, command).await;
                context.shutdown().await;

                result
            }
            Commands::Cart(command) => {
                let context = open(&self.config).await?;
                let result = cart::run(&context, command).await;
                context.shutdown().await;

                result
            }
            Commands::Site(command) => {
                let context = open(&self.config).await?;
                let result = site::run(&context, command).await;
                context.shutdown().await;

                result
            }
            Commands::Db(command) => db::run(&self.config, command).await,
        }
    }
}

async fn open(config: &AppConfig) -> Result<AppContext, String> {
    AppContext::from_config(config)
        .await
        .map_err(|error| format!("failed to start: {error}"))
}
