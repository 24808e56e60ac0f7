//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    database::Db,
    domain::{
        carts::PgCartsService,
        checkout::{FlatRatePricer, PgCheckoutService},
        orders::PgOrdersService,
        users::{PgUsersService, UsersService, data::NewUser, records::UserUuid},
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub user_uuid: UserUuid,
    pub users: PgUsersService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
    pub checkout: PgCheckoutService,
}

impl TestContext {
    /// Fresh database with one default user.
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let mut ctx = Self {
            users: PgUsersService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            checkout: PgCheckoutService::new(db, Arc::new(FlatRatePricer::default())),
            user_uuid: UserUuid::new(),
            db: test_db,
        };

        ctx.user_uuid = ctx.create_user("Test User").await;

        ctx
    }

    /// Create an additional user, e.g. for ownership isolation tests.
    pub async fn create_user(&self, name: &str) -> UserUuid {
        let uuid = UserUuid::new();

        self.users
            .create_user(NewUser {
                uuid,
                name: name.to_string(),
                email: format!("{uuid}@example.com"),
                password: "password".to_string(),
            })
            .await
            .expect("Failed to create test user");

        uuid
    }
}
