//! Update Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use cartwheel_app::domain::orders::{
    data::OrderUpdate,
    records::{OrderStatus, OrderUuid},
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, handlers::get::get_owned_order},
    state::State,
};

/// Update Order Request
///
/// Omitted fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderRequest {
    pub payment: Option<Value>,
    pub delivery: Option<Value>,
    pub comments: Option<String>,
    pub status: Option<String>,
    pub total: Option<u64>,
}

impl From<UpdateOrderRequest> for OrderUpdate {
    fn from(request: UpdateOrderRequest) -> Self {
        OrderUpdate {
            payment: request.payment,
            delivery: request.delivery,
            comments: request.comments,
            status: request.status.map(OrderStatus::from),
            total: request.total,
        }
    }
}

/// Update Order Handler
#[endpoint(
    tags("orders"),
    summary = "Update Order",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown caller"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update",
    skip(order, json, depot),
    fields(user_uuid = tracing::field::Empty, order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let order = OrderUuid::from_uuid(order.into_inner());
    let update = OrderUpdate::from(json.into_inner());

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("order_uuid", tracing::field::display(order));

    if update.is_empty() {
        return Err(StatusError::bad_request().brief("Update names no fields"));
    }

    get_owned_order(state, user, order).await?;

    state
        .app
        .orders
        .update_order(order, update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_uuid = %order, "updated order");

    Ok(StatusCode::NO_CONTENT)
}
