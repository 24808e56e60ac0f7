//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartUpdate, NewCartItem},
            errors::CartsServiceError,
            records::{CartRecord, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    async fn find_with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        let Some(mut cart) = self.carts_repository.find_cart_by_owner(tx, owner).await? else {
            return Ok(None);
        };

        let items = self.items_repository.get_cart_items(tx, cart.uuid).await?;

        cart.items.extend(items);

        Ok(Some(cart))
    }

    /// Expects the caller to hold the owner lock on `tx`.
    async fn find_or_create_with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        let created = self
            .carts_repository
            .ensure_cart(tx, CartUuid::new(), owner)
            .await?;

        if created {
            debug!(user_uuid = %owner, "created cart");
        }

        self.find_with_items(tx, owner)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn find_cart(&self, owner: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.find_with_items(&mut tx, owner).await?;

        tx.commit().await?;

        cart.ok_or(CartsServiceError::NotFound)
    }

    async fn create_cart(&self, owner: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let created = self
            .carts_repository
            .create_cart(&mut tx, CartUuid::new(), owner)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn find_or_create_cart(&self, owner: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let cart = self.find_or_create_with_items(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn update_cart(
        &self,
        owner: UserUuid,
        update: CartUpdate,
    ) -> Result<CartRecord, CartsServiceError> {
        if !update.items.iter().all(NewCartItem::is_valid) {
            return Err(CartsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let existing = self.find_or_create_with_items(&mut tx, owner).await?;

        let mut cart = self
            .carts_repository
            .update_cart(&mut tx, existing.uuid, update.status)
            .await?;

        let appended = self
            .items_repository
            .create_cart_items(&mut tx, cart.uuid, &update.items)
            .await?;

        tx.commit().await?;

        cart.items = existing.items;
        cart.items.extend(appended);

        Ok(cart)
    }

    async fn delete_cart(&self, owner: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let cart = self
            .carts_repository
            .find_cart_by_owner(&mut tx, owner)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        self.items_repository
            .delete_cart_items(&mut tx, cart.uuid)
            .await?;

        let rows_affected = self.carts_repository.delete_cart(&mut tx, cart.uuid).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the owner's cart with its items.
    async fn find_cart(&self, owner: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Creates an empty open cart for the owner.
    async fn create_cart(&self, owner: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Returns the owner's cart, creating an empty one when none exists.
    async fn find_or_create_cart(&self, owner: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Appends items to the owner's cart and optionally overwrites its status.
    ///
    /// Returns the cart with its prior items followed by the appended ones.
    async fn update_cart(
        &self,
        owner: UserUuid,
        update: CartUpdate,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Deletes the owner's cart and all of its items.
    async fn delete_cart(&self, owner: UserUuid) -> Result<(), CartsServiceError>;
}
