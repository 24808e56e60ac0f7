//! Checkout Config

use clap::Args;

use cartwheel_app::domain::checkout::DEFAULT_PLACEHOLDER_TOTAL;

/// Checkout settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Flat total, in minor units, charged for every checked out cart
    #[arg(long, env = "ORDER_PLACEHOLDER_TOTAL", default_value_t = DEFAULT_PLACEHOLDER_TOTAL)]
    pub order_placeholder_total: u64,
}
