//! Test Helpers

use sqlx::PgPool;

use crate::domain::carts::data::NewCartItem;

pub(crate) fn item(product: &str, count: u32) -> NewCartItem {
    NewCartItem {
        product_id: product.into(),
        count,
    }
}

/// Installs a trigger that raises on inserts or updates of `table` rows matching `when`.
///
/// Used to fail a write part-way through a transaction.
pub(crate) async fn fail_writes_when(
    pool: &PgPool,
    table: &str,
    when: &str,
) -> Result<(), sqlx::Error> {
    let sql = format!(
        "CREATE FUNCTION fail_{table}_write() RETURNS trigger LANGUAGE plpgsql AS $$
        BEGIN
            RAISE EXCEPTION 'write to {table} rejected';
        END
        $$;

        CREATE TRIGGER fail_{table}_write BEFORE INSERT OR UPDATE ON {table}
            FOR EACH ROW WHEN ({when}) EXECUTE FUNCTION fail_{table}_write();"
    );

    sqlx::raw_sql(&sql).execute(pool).await?;

    Ok(())
}
