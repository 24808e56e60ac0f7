//! Checkout service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{
            records::CartStatus,
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        checkout::{data::CheckoutDetails, errors::CheckoutServiceError, pricing::CartPricer},
        orders::{
            data::{NewOrder, NewOrderItem},
            records::{OrderRecord, OrderStatus, OrderUuid},
            repository::PgOrdersRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    pricer: Arc<dyn CartPricer>,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    orders_repository: PgOrdersRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db, pricer: Arc<dyn CartPricer>) -> Self {
        Self {
            db,
            pricer,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            orders_repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    async fn checkout(
        &self,
        owner: UserUuid,
        details: CheckoutDetails,
    ) -> Result<OrderRecord, CheckoutServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let cart = self
            .carts_repository
            .find_cart_by_owner(&mut tx, owner)
            .await?
            .ok_or(CheckoutServiceError::EmptyCart)?;

        let items = self.items_repository.get_cart_items(&mut tx, cart.uuid).await?;

        if items.is_empty() {
            return Err(CheckoutServiceError::EmptyCart);
        }

        if cart.status != CartStatus::Open {
            return Err(CheckoutServiceError::AlreadyOrdered);
        }

        let total = self.pricer.total(&items);

        let new_order = NewOrder {
            user_uuid: owner,
            cart_uuid: cart.uuid,
            items: items.iter().map(NewOrderItem::from).collect(),
            payment: details.payment,
            delivery: details.delivery,
            comments: details.comments,
            status: Some(OrderStatus::in_progress()),
            total,
        };

        if !new_order.is_valid() {
            return Err(CheckoutServiceError::InvalidData);
        }

        let order = self
            .orders_repository
            .create_order(&mut tx, OrderUuid::new(), new_order)
            .await?;

        self.carts_repository
            .update_cart(&mut tx, cart.uuid, Some(CartStatus::Ordered))
            .await?;

        tx.commit().await?;

        info!(
            user_uuid = %owner,
            cart_uuid = %cart.uuid,
            order_uuid = %order.uuid,
            total,
            "checked out cart"
        );

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Converts the owner's open cart into an order and marks the cart ordered.
    ///
    /// Either both writes happen or neither does.
    async fn checkout(
        &self,
        owner: UserUuid,
        details: CheckoutDetails,
    ) -> Result<OrderRecord, CheckoutServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::{CartsService, CartsServiceError, data::CartUpdate},
            checkout::FlatRatePricer,
            orders::OrdersService,
        },
        test::{
            TestContext,
            helpers::{fail_writes_when, item},
        },
    };

    use super::*;

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            payment: Some(json!({ "method": "card" })),
            delivery: Some(json!({ "address": "1 Main St" })),
            comments: Some("ring twice".to_string()),
        }
    }

    async fn order_count(ctx: &TestContext) -> TestResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(ctx.db.pool())
            .await?;

        Ok(count)
    }

    #[tokio::test]
    async fn checkout_without_cart_returns_empty_cart() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.checkout.checkout(ctx.user_uuid, details()).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );

        let cart = ctx.carts.find_cart(ctx.user_uuid).await;

        assert!(
            matches!(cart, Err(CartsServiceError::NotFound)),
            "checkout should not create a cart, got {cart:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_of_empty_cart_writes_nothing() -> TestResult {
        let ctx = TestContext::new().await;

        let before = ctx.carts.find_or_create_cart(ctx.user_uuid).await?;

        let result = ctx.checkout.checkout(ctx.user_uuid, details()).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );

        let after = ctx.carts.find_cart(ctx.user_uuid).await?;

        assert_eq!(after.status, CartStatus::Open);
        assert_eq!(after.updated_at, before.updated_at);
        assert_eq!(order_count(&ctx).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_creates_order_from_cart_and_marks_it_ordered() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = ctx
            .carts
            .update_cart(
                ctx.user_uuid,
                CartUpdate {
                    items: vec![item("p1", 2), item("p2", 1)],
                    status: None,
                },
            )
            .await?;

        let order = ctx.checkout.checkout(ctx.user_uuid, details()).await?;

        assert_eq!(order.user_uuid, ctx.user_uuid);
        assert_eq!(order.cart_uuid, cart.uuid);
        assert_eq!(order.status, OrderStatus::in_progress());
        assert_eq!(order.total, 100);
        assert_eq!(order.comments.as_deref(), Some("ring twice"));

        let ordered: Vec<(&str, u32)> = order
            .items
            .iter()
            .map(|i| (i.product_id.as_str(), i.count))
            .collect();

        assert_eq!(ordered, vec![("p1", 2), ("p2", 1)]);

        let stored = ctx.orders.get_order(order.uuid).await?;

        assert_eq!(stored.items, order.items);

        let cart = ctx.carts.find_cart(ctx.user_uuid).await?;

        assert_eq!(cart.status, CartStatus::Ordered);
        assert_eq!(cart.items.len(), 2, "checkout keeps the cart items");
        assert_eq!(order_count(&ctx).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn second_checkout_returns_already_ordered() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.carts
            .update_cart(
                ctx.user_uuid,
                CartUpdate {
                    items: vec![item("p1", 1)],
                    status: None,
                },
            )
            .await?;

        ctx.checkout.checkout(ctx.user_uuid, details()).await?;

        let result = ctx.checkout.checkout(ctx.user_uuid, details()).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::AlreadyOrdered)),
            "expected AlreadyOrdered, got {result:?}"
        );
        assert_eq!(order_count(&ctx).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn order_survives_clearing_the_cart() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.carts
            .update_cart(
                ctx.user_uuid,
                CartUpdate {
                    items: vec![item("p1", 4)],
                    status: None,
                },
            )
            .await?;

        let order = ctx.checkout.checkout(ctx.user_uuid, details()).await?;

        ctx.carts.delete_cart(ctx.user_uuid).await?;

        let stored = ctx.orders.get_order(order.uuid).await?;

        assert_eq!(stored.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn failed_cart_status_update_rolls_back_the_order() -> TestResult {
        let ctx = TestContext::new().await;

        let before = ctx
            .carts
            .update_cart(
                ctx.user_uuid,
                CartUpdate {
                    items: vec![item("p1", 2)],
                    status: None,
                },
            )
            .await?;

        fail_writes_when(ctx.db.pool(), "carts", "NEW.status = 'ORDERED'").await?;

        let result = ctx.checkout.checkout(ctx.user_uuid, details()).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::Sql(_))),
            "expected Sql, got {result:?}"
        );
        assert_eq!(order_count(&ctx).await?, 0, "the order insert should be rolled back");

        let order_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(order_items, 0);

        let after = ctx.carts.find_cart(ctx.user_uuid).await?;

        assert_eq!(after.status, CartStatus::Open);
        assert_eq!(after.items, before.items);

        Ok(())
    }

    #[tokio::test]
    async fn total_outside_storage_bounds_returns_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;
        let checkout = PgCheckoutService::new(
            Db::new(ctx.db.pool().clone()),
            Arc::new(FlatRatePricer::new(u64::MAX)),
        );

        ctx.carts
            .update_cart(
                ctx.user_uuid,
                CartUpdate {
                    items: vec![item("p1", 1)],
                    status: None,
                },
            )
            .await?;

        let result = checkout.checkout(ctx.user_uuid, details()).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        let cart = ctx.carts.find_cart(ctx.user_uuid).await?;

        assert_eq!(cart.status, CartStatus::Open);
        assert_eq!(order_count(&ctx).await?, 0);

        Ok(())
    }
}
