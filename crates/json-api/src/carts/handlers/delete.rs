//! Delete Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Deleted Response
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartDeletedResponse {}

/// Delete Cart Handler
///
/// Removes the caller's cart and every item in it.
#[endpoint(
    tags("carts"),
    summary = "Delete Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown caller"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.delete",
    skip(depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartDeletedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    state
        .app
        .carts
        .delete_cart(user)
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %user, "deleted cart");

    Ok(Json(CartDeletedResponse::default()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use cartwheel_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{TEST_USER_UUID, carts_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_returns_empty_object() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_delete_cart()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(()));

        let mut res = TestClient::delete("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "{}");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_delete_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::delete("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
