//! Checkout

pub mod data;
pub mod errors;
pub mod pricing;
pub mod service;

pub use errors::CheckoutServiceError;
pub use pricing::{CartPricer, DEFAULT_PLACEHOLDER_TOTAL, FlatRatePricer};
pub use service::*;
