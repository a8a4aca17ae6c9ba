//! Vitrina
//!
//! Shopping cart domain for a custom-apparel storefront: product snapshots,
//! line items keyed by product, size and colour, cart arithmetic and the
//! versioned snapshot format shared by every persistence tier. Also holds
//! the editable site content shown around the catalog.

pub mod cart;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod site;
pub mod snapshot;
pub mod summary;
