use clap::{Args, Subcommand};
use vitrina::summary::catalog_table;
use vitrina_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// List every product with its orderable sizes and colors
    List,
}

pub(crate) async fn run(context: &AppContext, command: CatalogCommand) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::List => {
            let products = context.catalog.list_products().await;

            if products.is_empty() {
                println!("no products available");
                return Ok(());
            }

            println!("{}", catalog_table(&products));

            Ok(())
        }
    }
}
