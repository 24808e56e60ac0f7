//! Cart Pricing

use std::fmt::Debug;

use crate::domain::carts::records::CartItemRecord;

/// Total charged when no catalog prices are available.
pub const DEFAULT_PLACEHOLDER_TOTAL: u64 = 100;

/// Computes the order total for a cart's items, in minor units.
pub trait CartPricer: Debug + Send + Sync {
    fn total(&self, items: &[CartItemRecord]) -> u64;
}

/// Charges the same amount for every cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRatePricer {
    total: u64,
}

impl FlatRatePricer {
    #[must_use]
    pub const fn new(total: u64) -> Self {
        Self { total }
    }
}

impl Default for FlatRatePricer {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_TOTAL)
    }
}

impl CartPricer for FlatRatePricer {
    fn total(&self, _items: &[CartItemRecord]) -> u64 {
        self.total
    }
}
