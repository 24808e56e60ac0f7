//! App Router

use salvo::Router;

use crate::{carts, checkout, identity, orders};

/// Routes that require a resolved caller identity.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(identity::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .put(carts::update::handler)
                .delete(carts::delete::handler)
                .push(Router::with_path("checkout").post(checkout::create::handler)),
        )
        .push(
            Router::with_path("orders/{order}")
                .get(orders::get::handler)
                .patch(orders::update::handler),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        Service,
        affix_state::inject,
        http::StatusCode,
        test::TestClient,
    };
    use testresult::TestResult;

    use cartwheel_app::domain::users::MockUsersService;

    use crate::test_helpers::state_with_users;

    use super::*;

    #[tokio::test]
    async fn test_routes_require_identity() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_get_user().never();

        let service = Service::new(
            Router::new()
                .hoop(inject(state_with_users(users)))
                .push(app_router()),
        );

        for url in [
            "http://example.com/cart",
            "http://example.com/orders/0190a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b",
        ] {
            let res = TestClient::get(url).send(&service).await;

            assert_eq!(
                res.status_code,
                Some(StatusCode::UNAUTHORIZED),
                "expected 401 for {url}"
            );
        }

        Ok(())
    }
}
