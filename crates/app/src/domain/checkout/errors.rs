//! Checkout service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Cart has already been ordered")]
    AlreadyOrdered,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CheckoutServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cart_message_is_user_facing() {
        assert_eq!(CheckoutServiceError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn row_not_found_is_a_storage_error() {
        let error = CheckoutServiceError::from(Error::RowNotFound);

        assert!(
            matches!(error, CheckoutServiceError::Sql(Error::RowNotFound)),
            "expected Sql, got {error:?}"
        );
    }
}
