//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cartwheel_app::domain::carts::records::{CartItemRecord, CartRecord};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEnvelope {
    pub cart: CartResponse,
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The user owning the cart
    pub user_uuid: Uuid,

    /// Lifecycle status, `OPEN` or `ORDERED`
    pub status: String,

    /// The items in the cart, in the order they were added
    pub items: Vec<CartItemResponse>,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        Self {
            uuid: cart.uuid.into(),
            user_uuid: cart.user_uuid.into(),
            status: cart.status.to_string(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Product Reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductReference {
    /// The catalog identifier of the product, passed through unresolved
    pub id: String,
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    /// The product in the cart item
    pub product: ProductReference,

    /// How many units of the product were added
    pub count: u32,

    /// The date and time the item was added
    pub created_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product: ProductReference {
                id: item.product_id.into_string(),
            },
            count: item.count,
            created_at: item.created_at.to_string(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's cart, creating an empty one on first access.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart found or created"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown caller"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.get",
    skip(depot),
    fields(user_uuid = tracing::field::Empty, cart_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .find_or_create_cart(user)
        .await
        .map_err(into_status_error)?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("cart_uuid", tracing::field::display(cart.uuid));

    Ok(Json(CartEnvelope { cart: cart.into() }))
}
