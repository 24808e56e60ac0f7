//! Order Data

use serde_json::Value;

use crate::domain::{
    carts::{
        data::MAX_ITEM_COUNT,
        records::{CartItemRecord, CartUuid, ProductId},
    },
    orders::records::OrderStatus,
    users::records::UserUuid,
};

/// Largest total the storage column can hold.
pub const MAX_ORDER_TOTAL: u64 = i64::MAX.unsigned_abs();

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_uuid: UserUuid,
    pub cart_uuid: CartUuid,
    pub items: Vec<NewOrderItem>,
    pub payment: Option<Value>,
    pub delivery: Option<Value>,
    pub comments: Option<String>,

    /// Falls back to [`OrderStatus::in_progress`] when omitted.
    pub status: Option<OrderStatus>,

    /// Amount in minor units, stored as given.
    pub total: u64,
}

impl NewOrder {
    /// Whether every item is storable and the total fits its column.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.total <= MAX_ORDER_TOTAL && self.items.iter().all(NewOrderItem::is_valid)
    }
}

/// New Order Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub count: u32,
}

impl NewOrderItem {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.product_id.is_blank() && (1..=MAX_ITEM_COUNT).contains(&self.count)
    }
}

impl From<&CartItemRecord> for NewOrderItem {
    fn from(item: &CartItemRecord) -> Self {
        Self {
            product_id: item.product_id.clone(),
            count: item.count,
        }
    }
}

/// Order Update Data
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderUpdate {
    pub payment: Option<Value>,
    pub delivery: Option<Value>,
    pub comments: Option<String>,
    pub status: Option<OrderStatus>,
    pub total: Option<u64>,
}

impl OrderUpdate {
    /// Whether the update names no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payment.is_none()
            && self.delivery.is_none()
            && self.comments.is_none()
            && self.status.is_none()
            && self.total.is_none()
    }

    /// Whether a supplied total fits its column.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.total.is_none_or(|total| total <= MAX_ORDER_TOTAL)
    }
}
