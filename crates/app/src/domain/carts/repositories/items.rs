//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{to_i32, try_get_u32},
    domain::carts::{
        data::NewCartItem,
        records::{CartItemRecord, CartItemUuid, CartUuid, ProductId},
    },
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const CREATE_CART_ITEMS_SQL: &str = include_str!("../sql/create_cart_items.sql");
const DELETE_CART_ITEMS_SQL: &str = include_str!("../sql/delete_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Appends `items` to the cart in a single statement, preserving their order.
    pub(crate) async fn create_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        items: &[NewCartItem],
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = items.iter().map(|_| CartItemUuid::new().into()).collect();
        let products: Vec<&str> = items.iter().map(|item| item.product_id.as_str()).collect();
        let counts = items
            .iter()
            .map(|item| to_i32(item.count))
            .collect::<Result<Vec<i32>, _>>()?;

        query_as::<Postgres, CartItemRecord>(CREATE_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .bind(uuids)
            .bind(products)
            .bind(counts)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            product_id: ProductId::from(row.try_get::<String, _>("product_id")?),
            count: try_get_u32(row, "count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
