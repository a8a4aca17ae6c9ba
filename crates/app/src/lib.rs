//! Vitrina application layer
//!
//! Identity, the cart and catalog stores with their remote and device-local
//! persistence tiers, configuration and logging.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod identity;
pub mod observability;
pub mod storage;
#[cfg(test)]
mod test;
