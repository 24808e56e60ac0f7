//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::orders::{
        data::{NewOrder, OrderUpdate},
        errors::OrdersServiceError,
        records::{OrderRecord, OrderUuid},
        repository::PgOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        if !order.is_valid() {
            return Err(OrdersServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_order(&mut tx, OrderUuid::new(), order)
            .await?;

        tx.commit().await?;

        debug!(order_uuid = %created.uuid, items = created.items.len(), "created order");

        Ok(created)
    }

    async fn update_order(
        &self,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<(), OrdersServiceError> {
        if update.is_empty() || !update.is_valid() {
            return Err(OrdersServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.update_order(&mut tx, order, update).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieve a single order with its items.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Creates an order and its item snapshot.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Overwrites the fields named by `update`, leaving the rest untouched.
    async fn update_order(
        &self,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<(), OrdersServiceError>;
}
