//! Carts

pub mod models;
pub mod records;
mod repositories;
mod store;
mod writer;

pub use models::MergePolicy;
pub use repositories::*;
pub use store::CartStore;
