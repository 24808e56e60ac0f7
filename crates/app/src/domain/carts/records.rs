//! Cart Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Product identifier, an opaque reference into the external catalog.
///
/// Never resolved here; any non-blank string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Cart lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CartStatus {
    /// Accepting item updates; eligible for checkout.
    #[default]
    Open,

    /// Converted into an order.
    Ordered,
}

impl CartStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Ordered => "ORDERED",
        }
    }
}

impl fmt::Display for CartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown cart status {0:?}")]
pub struct UnknownCartStatus(pub String);

impl FromStr for CartStatus {
    type Err = UnknownCartStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "OPEN" => Ok(Self::Open),
            "ORDERED" => Ok(Self::Ordered),
            other => Err(UnknownCartStatus(other.to_string())),
        }
    }
}

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub status: CartStatus,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    /// Whether the cart holds no item rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_id: ProductId,
    pub count: u32,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_its_own_representation() {
        for status in [CartStatus::Open, CartStatus::Ordered] {
            assert_eq!(status.as_str().parse::<CartStatus>().ok(), Some(status));
        }
    }

    #[test]
    fn product_id_is_blank_only_without_visible_characters() {
        assert!(ProductId::from("").is_blank());
        assert!(ProductId::from("  ").is_blank());
        assert!(!ProductId::from("p1").is_blank());
    }

    #[test]
    fn status_rejects_unknown_values() {
        let result = "open".parse::<CartStatus>();

        assert!(result.is_err(), "status parsing is case sensitive");
    }
}
