//! Cart Models

use clap::ValueEnum;

/// What happens to a guest cart when the visitor signs in and a remote cart
/// already exists for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MergePolicy {
    /// The remote cart replaces the guest cart.
    #[default]
    RemoteWins,

    /// Both carts are combined, summing quantities of shared slots.
    Union,
}
