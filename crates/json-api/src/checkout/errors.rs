//! Errors

use salvo::http::StatusError;
use tracing::error;

use cartwheel_app::domain::checkout::CheckoutServiceError;

pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        CheckoutServiceError::AlreadyOrdered => {
            StatusError::conflict().brief("Cart has already been ordered")
        }
        CheckoutServiceError::InvalidReference
        | CheckoutServiceError::MissingRequiredData
        | CheckoutServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid checkout payload")
        }
        CheckoutServiceError::Sql(source) => {
            error!("checkout storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
