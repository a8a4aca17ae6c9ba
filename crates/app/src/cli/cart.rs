use std::io;

use clap::{Args, Subcommand};
use vitrina::{
    products::{Product, ProductId},
    summary::write_cart_summary,
};
use vitrina_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart and its totals
    Show,

    /// Add units of a product in one size and color
    Add(AddArgs),

    /// Remove a product in one size and color
    Remove(SlotArgs),

    /// Set the quantity of a product in one size and color; 0 removes it
    Set(SetArgs),

    /// Empty the cart
    Clear,

    /// Sign in and adopt or merge the saved cart of `email`
    Login {
        /// E-mail to sign in as
        email: String,
    },

    /// Sign out; the cart is emptied, even for a guest
    Logout,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product identifier
    product_id: String,

    /// Size selector; defaults to the first orderable size
    #[arg(long)]
    size: Option<String>,

    /// Color selector; defaults to the first color
    #[arg(long)]
    color: Option<String>,

    /// Units to add
    #[arg(long, short, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct SlotArgs {
    /// Product identifier
    product_id: String,

    /// Size selector
    #[arg(long)]
    size: String,

    /// Color selector
    #[arg(long)]
    color: String,
}

#[derive(Debug, Args)]
struct SetArgs {
    #[command(flatten)]
    slot: SlotArgs,

    /// New quantity
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) async fn run(context: &AppContext, command: CartCommand) -> Result<(), String> {
    let carts = &context.carts;

    match command.command {
        CartSubcommand::Show => {}
        CartSubcommand::Add(args) => {
            let product = context
                .catalog
                .get_product(&ProductId::new(args.product_id))
                .await
                .map_err(|error| error.to_string())?;

            let size = match args.size {
                Some(size) => size,
                None => default_size(&product)?,
            };
            let color = match args.color {
                Some(color) => color,
                None => default_color(&product)?,
            };

            carts.add_item(product, &size, &color, args.quantity);
        }
        CartSubcommand::Remove(slot) => {
            carts.remove_item(&ProductId::new(slot.product_id), &slot.size, &slot.color);
        }
        CartSubcommand::Set(SetArgs { slot, quantity }) => {
            carts.update_quantity(
                &ProductId::new(slot.product_id),
                &slot.size,
                &slot.color,
                quantity,
            );
        }
        CartSubcommand::Clear => carts.clear(),
        CartSubcommand::Login { email } => {
            let identity = context
                .sign_in(&email)
                .await
                .map_err(|error| error.to_string())?;

            if let Some(email) = identity.email() {
                println!("signed in as {email}");
            }
        }
        CartSubcommand::Logout => {
            context.sign_out().await;

            println!("signed out");
        }
    }

    write_cart_summary(&mut io::stdout().lock(), &carts.cart())
        .map_err(|error| format!("failed to print cart: {error}"))
}

fn default_size(product: &Product) -> Result<String, String> {
    product
        .available_sizes()
        .next()
        .map(|size| size.id.clone())
        .ok_or_else(|| format!("{} has no orderable size; pass --size", product.id))
}

fn default_color(product: &Product) -> Result<String, String> {
    product
        .colors
        .first()
        .map(|color| color.id.clone())
        .ok_or_else(|| format!("{} has no color; pass --color", product.id))
}
