//! Cart Repositories

mod remote;

pub use remote::*;
