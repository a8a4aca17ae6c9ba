//! Vitrina prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    fixtures::{FixtureError, default_catalog, default_site_info},
    items::{LineItem, LineKey},
    pricing::format_price,
    products::{Color, Product, ProductId, Size},
    site::{CustomLink, FaqItem, SiteInfo},
    snapshot::{SNAPSHOT_VERSION, SnapshotError},
    summary::{catalog_table, site_table, write_cart_summary},
};
