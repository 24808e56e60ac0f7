//! Checkout Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use cartwheel_app::domain::{
    checkout::{CheckoutServiceError, data::CheckoutDetails},
    orders::records::OrderRecord,
};

use crate::{
    checkout::errors::into_status_error, extensions::*, observability::observe_checkout,
    orders::handlers::get::OrderEnvelope, state::State,
};

/// Checkout Request
///
/// The body is optional; an absent or blank body checks out without details.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    pub payment: Option<Value>,
    pub delivery: Option<Value>,
    pub comments: Option<String>,
}

fn outcome(result: &Result<OrderRecord, CheckoutServiceError>) -> &'static str {
    match result {
        Ok(_) => "ordered",
        Err(CheckoutServiceError::EmptyCart) => "empty_cart",
        Err(CheckoutServiceError::AlreadyOrdered) => "already_ordered",
        Err(_) => "failed",
    }
}

fn invalid_payload(error: &dyn std::fmt::Display) -> StatusError {
    tracing::debug!("rejected checkout payload: {error}");

    StatusError::bad_request().brief("Invalid checkout payload")
}

async fn read_request(req: &mut Request) -> Result<CheckoutRequest, StatusError> {
    let payload = req
        .payload()
        .await
        .map_err(|error| invalid_payload(&error))?;

    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(CheckoutRequest::default());
    }

    serde_json::from_slice(payload).map_err(|error| invalid_payload(&error))
}

impl From<CheckoutRequest> for CheckoutDetails {
    fn from(request: CheckoutRequest) -> Self {
        CheckoutDetails {
            payment: request.payment,
            delivery: request.delivery,
            comments: request.comments,
        }
    }
}

/// Checkout Handler
///
/// Turns the caller's open cart into an order.
#[endpoint(
    tags("carts", "orders"),
    summary = "Checkout Cart",
    responses(
        (status_code = StatusCode::OK, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty"),
        (status_code = StatusCode::CONFLICT, description = "Cart has already been ordered"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown caller"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.checkout",
    skip(req, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        cart_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let details = CheckoutDetails::from(read_request(req).await?);

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));

    let result = state.app.checkout.checkout(user, details).await;

    observe_checkout(outcome(&result));

    let order = result.map_err(into_status_error)?;

    span.record("cart_uuid", tracing::field::display(order.cart_uuid));
    span.record("order_uuid", tracing::field::display(order.uuid));

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?;

    Ok(Json(OrderEnvelope {
        order: order.into(),
    }))
}
