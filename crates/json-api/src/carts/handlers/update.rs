//! Update Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use cartwheel_app::domain::carts::{
    data::{CartUpdate, NewCartItem},
    records::{CartStatus, ProductId},
};

use crate::{
    carts::{
        errors::into_status_error,
        handlers::get::{CartEnvelope, ProductReference},
    },
    extensions::*,
    state::State,
};

/// Cart Status Value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum CartStatusValue {
    Open,
    Ordered,
}

impl From<CartStatusValue> for CartStatus {
    fn from(value: CartStatusValue) -> Self {
        match value {
            CartStatusValue::Open => CartStatus::Open,
            CartStatusValue::Ordered => CartStatus::Ordered,
        }
    }
}

/// Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemRequest {
    /// The product to add
    pub product: ProductReference,

    /// How many units to add, at least one
    pub count: u32,
}

/// Update Cart Request
///
/// Every item is appended as a new cart line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartRequest {
    #[serde(default)]
    pub items: Vec<CartItemRequest>,

    pub status: Option<CartStatusValue>,
}

impl From<UpdateCartRequest> for CartUpdate {
    fn from(request: UpdateCartRequest) -> Self {
        CartUpdate {
            items: request
                .items
                .into_iter()
                .map(|item| NewCartItem {
                    product_id: ProductId::from(item.product.id),
                    count: item.count,
                })
                .collect(),
            status: request.status.map(CartStatus::from),
        }
    }
}

/// Update Cart Handler
///
/// Appends items to the caller's cart, creating the cart when needed.
#[endpoint(
    tags("carts"),
    summary = "Update Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown caller"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.update",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        cart_uuid = tracing::field::Empty,
        items_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let update = CartUpdate::from(json.into_inner());

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("items_count", update.items.len());

    let cart = state
        .app
        .carts
        .update_cart(user, update)
        .await
        .map_err(into_status_error)?;

    span.record("cart_uuid", tracing::field::display(cart.uuid));

    tracing::info!(cart_uuid = %cart.uuid, items = cart.items.len(), "updated cart");

    Ok(Json(CartEnvelope { cart: cart.into() }))
}
