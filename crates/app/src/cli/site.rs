use clap::{Args, Subcommand};
use vitrina::summary::site_table;
use vitrina_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct SiteCommand {
    #[command(subcommand)]
    command: SiteSubcommand,
}

#[derive(Debug, Subcommand)]
enum SiteSubcommand {
    /// Show the storefront content: contact details, FAQ and footer links
    Show,
}

pub(crate) async fn run(context: &AppContext, command: SiteCommand) -> Result<(), String> {
    match command.command {
        SiteSubcommand::Show => {
            println!("{}", site_table(&context.site.site_info().await));

            Ok(())
        }
    }
}
