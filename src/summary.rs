//! Summaries
//!
//! Plain-text rendering of a cart (one table row per line item followed by
//! the derived totals) and of the product catalog.

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{cart::Cart, pricing::format_price, products::Product, site::SiteInfo};

/// Render the line item table for a cart.
pub fn cart_table(cart: &Cart) -> String {
    let mut builder = Builder::default();

    builder.push_record(["#", "Product", "Size", "Color", "Qty", "Unit", "Subtotal"]);

    for (idx, item) in cart.items().iter().enumerate() {
        builder.push_record([
            format!("{}", idx + 1),
            item.product.title.clone(),
            item.size_name().to_string(),
            item.color_name().to_string(),
            item.quantity.to_string(),
            format_price(item.product.price),
            format_price(item.subtotal()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(4..7), Alignment::right());

    table.to_string()
}

/// Write the table and totals for a cart.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_cart_summary(out: &mut impl io::Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Tu carrito está vacío");
    }

    writeln!(out, "{}", cart_table(cart))?;
    writeln!(out, " Items: {}", cart.total_items())?;
    writeln!(out, " Total: {}", format_price(cart.total_price()))
}

/// Render the catalog, one row per product with its orderable options.
pub fn catalog_table(products: &[Product]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Product", "Price", "Sizes", "Colors", "Stock"]);

    for product in products {
        let sizes: Vec<&str> = product
            .available_sizes()
            .map(|size| size.id.as_str())
            .collect();
        let colors: Vec<&str> = product.colors.iter().map(|c| c.id.as_str()).collect();

        builder.push_record([
            product.id.to_string(),
            product.title.clone(),
            format_price(product.price),
            sizes.join(", "),
            colors.join(", "),
            product.stock_quantity.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..3), Alignment::right());
    table.modify(Columns::new(5..6), Alignment::right());

    table.to_string()
}

/// Render the site content as a two-column field table.
pub fn site_table(info: &SiteInfo) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Field", "Value"]);

    let contact = [
        ("Slogan", info.slogan.clone()),
        ("WhatsApp", info.whatsapp_link().unwrap_or_default()),
        ("E-mail", info.email_address.clone()),
        ("Address", info.address.clone()),
        ("Instagram", info.instagram_link.clone()),
        ("Facebook", info.facebook_link.clone()),
        ("Carousel", info.carousel_images.join(", ")),
        ("Products", info.products_title.clone()),
    ];

    for (field, value) in contact {
        builder.push_record([field.to_string(), value]);
    }

    for faq in &info.faq_items {
        builder.push_record([format!("FAQ: {}", faq.question), faq.answer.clone()]);
    }

    for link in &info.footer_custom_links {
        builder.push_record([format!("Link: {}", link.label), link.url.clone()]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());

    table.to_string()
}
