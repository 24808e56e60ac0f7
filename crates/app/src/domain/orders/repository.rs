//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{to_i32, to_i64, try_get_u32, try_get_u64},
    domain::{
        carts::records::{CartUuid, ProductId},
        orders::{
            data::{NewOrder, NewOrderItem, OrderUpdate},
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid},
        },
        users::records::UserUuid,
    },
};

const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEMS_SQL: &str = include_str!("sql/create_order_items.sql");
const UPDATE_ORDER_SQL: &str = include_str!("sql/update_order.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Fetch an order together with its item rows.
    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut record = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        record.items = query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(record)
    }

    /// Insert the order row followed by its item snapshot.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        new_order: NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        let status = new_order.status.unwrap_or_default();

        let mut record = query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(new_order.user_uuid.into_uuid())
            .bind(new_order.cart_uuid.into_uuid())
            .bind(new_order.payment)
            .bind(new_order.delivery)
            .bind(new_order.comments)
            .bind(status.into_string())
            .bind(to_i64(new_order.total)?)
            .fetch_one(&mut **tx)
            .await?;

        record.items = self
            .create_order_items(tx, order, &new_order.items)
            .await?;

        Ok(record)
    }

    async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        items: &[NewOrderItem],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = items.iter().map(|_| OrderItemUuid::new().into()).collect();
        let products: Vec<&str> = items.iter().map(|item| item.product_id.as_str()).collect();
        let counts = items
            .iter()
            .map(|item| to_i32(item.count))
            .collect::<Result<Vec<i32>, _>>()?;

        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .bind(uuids)
            .bind(products)
            .bind(counts)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<u64, sqlx::Error> {
        let total = update.total.map(to_i64).transpose()?;

        let rows_affected = query(UPDATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(update.payment)
            .bind(update.delivery)
            .bind(update.comments)
            .bind(update.status.map(OrderStatus::into_string))
            .bind(total)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            items: Vec::new(),
            payment: row.try_get("payment")?,
            delivery: row.try_get("delivery")?,
            comments: row.try_get("comments")?,
            status: OrderStatus::from(status),
            total: try_get_u64(row, "total")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_id: ProductId::from(row.try_get::<String, _>("product_id")?),
            count: try_get_u32(row, "count")?,
        })
    }
}
