//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use serde_json::json;
use uuid::Uuid;

use cartwheel_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartStatus, CartUuid, ProductId},
        },
        checkout::MockCheckoutService,
        orders::{
            MockOrdersService,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid},
        },
        users::{
            MockUsersService,
            records::{UserRecord, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_get_user().never();

    users
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_find_cart().never();
    carts.expect_create_cart().never();
    carts.expect_find_or_create_cart().never();
    carts.expect_update_cart().never();
    carts.expect_delete_cart().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_get_order().never();
    orders.expect_create_order().never();
    orders.expect_update_order().never();

    orders
}

fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_checkout().never();

    checkout
}

/// Mocks that fail the test if any service is called.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) users: Option<MockUsersService>,
    pub(crate) carts: Option<MockCartsService>,
    pub(crate) orders: Option<MockOrdersService>,
    pub(crate) checkout: Option<MockCheckoutService>,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            users: Arc::new(self.users.unwrap_or_else(strict_users_mock)),
            carts: Arc::new(self.carts.unwrap_or_else(strict_carts_mock)),
            orders: Arc::new(self.orders.unwrap_or_else(strict_orders_mock)),
            checkout: Arc::new(self.checkout.unwrap_or_else(strict_checkout_mock)),
        })
    }
}

pub(crate) fn state_with_users(users: MockUsersService) -> Arc<State> {
    Mocks {
        users: Some(users),
        ..Mocks::default()
    }
    .into_state()
}

fn authenticated_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    let state = Mocks {
        carts: Some(carts),
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    let state = Mocks {
        orders: Some(orders),
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    let state = Mocks {
        checkout: Some(checkout),
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}

pub(crate) fn make_user(uuid: UserUuid) -> UserRecord {
    UserRecord {
        uuid,
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        password: "password".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(uuid: CartUuid, items: &[(&str, u32)]) -> CartRecord {
    CartRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        status: CartStatus::Open,
        items: items
            .iter()
            .map(|(product, count)| CartItemRecord {
                uuid: CartItemUuid::new(),
                cart_uuid: uuid,
                product_id: ProductId::from(*product),
                count: *count,
                created_at: Timestamp::UNIX_EPOCH,
            })
            .collect(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, owner: UserUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        user_uuid: owner,
        cart_uuid: CartUuid::new(),
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_id: ProductId::from("p1"),
            count: 2,
        }],
        payment: Some(json!({ "method": "card" })),
        delivery: Some(json!({ "address": "1 Main St" })),
        comments: None,
        status: OrderStatus::in_progress(),
        total: 100,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
