//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use cartwheel_app::domain::{
    orders::records::{OrderItemRecord, OrderRecord, OrderUuid},
    users::records::UserUuid,
};

use crate::{
    carts::handlers::get::ProductReference, extensions::*, orders::errors::into_status_error,
    state::State,
};

/// Order Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderEnvelope {
    pub order: OrderResponse,
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// The user who placed the order
    pub user_uuid: Uuid,

    /// The cart the order was created from
    pub cart_uuid: Uuid,

    /// Snapshot of the cart items at checkout
    pub items: Vec<OrderItemResponse>,

    /// Payment details, as supplied at checkout
    pub payment: Option<Value>,

    /// Delivery details, as supplied at checkout
    pub delivery: Option<Value>,

    pub comments: Option<String>,

    pub status: String,

    /// Amount in minor units
    pub total: u64,

    /// The date and time the order was created
    pub created_at: String,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into(),
            user_uuid: order.user_uuid.into(),
            cart_uuid: order.cart_uuid.into(),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            payment: order.payment,
            delivery: order.delivery,
            comments: order.comments,
            status: order.status.into_string(),
            total: order.total,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product: ProductReference,
    pub count: u32,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product: ProductReference {
                id: item.product_id.into_string(),
            },
            count: item.count,
        }
    }
}

/// Loads an order, hiding orders owned by other users behind a 404.
pub(crate) async fn get_owned_order(
    state: &State,
    user: UserUuid,
    order: OrderUuid,
) -> Result<OrderRecord, StatusError> {
    let order = state
        .app
        .orders
        .get_order(order)
        .await
        .map_err(into_status_error)?;

    if order.user_uuid != user {
        return Err(StatusError::not_found().brief("Order not found"));
    }

    Ok(order)
}

/// Get Order Handler
///
/// Returns one of the caller's orders.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown caller"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.get",
    skip(order, depot),
    fields(user_uuid = tracing::field::Empty, order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let order = OrderUuid::from_uuid(order.into_inner());

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("order_uuid", tracing::field::display(order));

    let order = get_owned_order(state, user, order).await?;

    Ok(Json(OrderEnvelope {
        order: order.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use cartwheel_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::{TEST_USER_UUID, make_order, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders/{order}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_order() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid, TEST_USER_UUID);

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |o| *o == uuid)
            .return_once(move |_| Ok(order));

        let mut res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderEnvelope = res.take_json().await?;

        assert_eq!(body.order.uuid, uuid.into_uuid());
        assert_eq!(body.order.status, "IN PROGRESS");
        assert_eq!(body.order.total, 100);
        assert_eq!(body.order.items.len(), 1);
        assert_eq!(body.order.payment, Some(json!({ "method": "card" })));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_other_users_order_returns_404() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid, UserUuid::new());

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(move |_| Ok(order));

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}", OrderUuid::new()))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_invalid_uuid_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_get_order().never();

        let res = TestClient::get("http://example.com/orders/not-a-uuid")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
