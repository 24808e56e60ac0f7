//! Cart Data

use crate::domain::carts::records::{CartStatus, ProductId};

/// Largest item count the storage column can hold.
pub const MAX_ITEM_COUNT: u32 = i32::MAX.unsigned_abs();

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub count: u32,
}

impl NewCartItem {
    /// A storable item names a product and has a count in `1..=MAX_ITEM_COUNT`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.product_id.is_blank() && (1..=MAX_ITEM_COUNT).contains(&self.count)
    }
}

/// Cart Update Data
///
/// Every item is appended as a new row, even when its product is already in
/// the cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartUpdate {
    pub items: Vec<NewCartItem>,
    pub status: Option<CartStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(product: &str, count: u32) -> NewCartItem {
        NewCartItem {
            product_id: product.into(),
            count,
        }
    }

    #[test]
    fn items_within_storage_bounds_are_valid() {
        assert!(new_item("p1", 1).is_valid());
        assert!(new_item("p1", MAX_ITEM_COUNT).is_valid());
    }

    #[test]
    fn items_outside_storage_bounds_are_invalid() {
        assert!(!new_item("p1", 0).is_valid());
        assert!(!new_item("p1", MAX_ITEM_COUNT + 1).is_valid());
        assert!(!new_item("", 1).is_valid());
    }
}
