//! Checkout Data

use serde_json::Value;

/// Caller-supplied details attached to the order created at checkout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutDetails {
    pub payment: Option<Value>,
    pub delivery: Option<Value>,
    pub comments: Option<String>,
}
