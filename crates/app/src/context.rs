//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        checkout::{CartPricer, CheckoutService, PgCheckoutService},
        orders::{OrdersService, PgOrdersService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Arc<dyn CheckoutService>,
}

impl AppContext {
    /// Build application context from a database URL and pool size.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        pricer: Arc<dyn CartPricer>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_pool(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool), pricer))
    }

    #[must_use]
    pub fn from_db(db: Db, pricer: Arc<dyn CartPricer>) -> Self {
        Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            checkout: Arc::new(PgCheckoutService::new(db, pricer)),
        }
    }
}
