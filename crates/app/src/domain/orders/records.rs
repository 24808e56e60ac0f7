//! Order Records

use std::fmt;

use jiff::Timestamp;
use serde_json::Value;

use crate::{
    domain::{
        carts::records::{CartUuid, ProductId},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order status.
///
/// Orders carry free-form status labels; only the initial one is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderStatus(String);

impl OrderStatus {
    pub const IN_PROGRESS: &'static str = "IN PROGRESS";

    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    #[must_use]
    pub fn in_progress() -> Self {
        Self::new(Self::IN_PROGRESS)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::in_progress()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderStatus {
    fn from(status: &str) -> Self {
        Self::new(status)
    }
}

impl From<String> for OrderStatus {
    fn from(status: String) -> Self {
        Self(status)
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub cart_uuid: CartUuid,
    pub items: Vec<OrderItemRecord>,
    pub payment: Option<Value>,
    pub delivery: Option<Value>,
    pub comments: Option<String>,
    pub status: OrderStatus,
    pub total: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_id: ProductId,
    pub count: u32,
}
