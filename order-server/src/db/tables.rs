//! Restaurant table database operations

use shared::models::{RestaurantTable, TableCreate, TableUpdate};
use shared::order::TableStatus;
use shared::{qr, util};
use sqlx::{PgExecutor, PgPool};

const TABLE_COLUMNS: &str =
    "id, restaurant_id, table_type, number, status, qr_token, created_at";

pub async fn list(pool: &PgPool, restaurant_id: &str) -> Result<Vec<RestaurantTable>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {TABLE_COLUMNS} FROM restaurant_tables
         WHERE restaurant_id = $1 ORDER BY number"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id<'e>(
    ex: impl PgExecutor<'e>,
    id: &str,
) -> Result<Option<RestaurantTable>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {TABLE_COLUMNS} FROM restaurant_tables WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(ex)
    .await
}

pub async fn find_by_qr_token(
    pool: &PgPool,
    qr_token: &str,
) -> Result<Option<RestaurantTable>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {TABLE_COLUMNS} FROM restaurant_tables WHERE qr_token = $1"
    ))
    .bind(qr_token)
    .fetch_optional(pool)
    .await
}

pub async fn count(pool: &PgPool, restaurant_id: &str) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM restaurant_tables WHERE restaurant_id = $1")
            .bind(restaurant_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

pub async fn create(
    pool: &PgPool,
    restaurant_id: &str,
    data: &TableCreate,
) -> Result<RestaurantTable, sqlx::Error> {
    let id = super::new_id();
    let table = RestaurantTable {
        qr_token: qr::encode_table_token(&id),
        id,
        restaurant_id: restaurant_id.to_string(),
        table_type: data.table_type,
        number: data.number,
        status: TableStatus::Available,
        created_at: util::now_millis(),
    };

    sqlx::query(
        "INSERT INTO restaurant_tables (id, restaurant_id, table_type, number, status, qr_token, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(&table.id)
    .bind(&table.restaurant_id)
    .bind(table.table_type)
    .bind(table.number)
    .bind(table.status)
    .bind(&table.qr_token)
    .bind(table.created_at)
    .execute(pool)
    .await?;

    Ok(table)
}

pub async fn update(
    pool: &PgPool,
    restaurant_id: &str,
    id: &str,
    data: &TableUpdate,
) -> Result<Option<RestaurantTable>, sqlx::Error> {
    sqlx::query(
        "UPDATE restaurant_tables SET
            table_type = COALESCE($1, table_type),
            number = COALESCE($2, number)
         WHERE id = $3 AND restaurant_id = $4",
    )
    .bind(data.table_type)
    .bind(data.number)
    .bind(id)
    .bind(restaurant_id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await
}

pub async fn delete(pool: &PgPool, restaurant_id: &str, id: &str) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM restaurant_tables WHERE id = $1 AND restaurant_id = $2")
        .bind(id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn set_status<'e>(
    ex: impl PgExecutor<'e>,
    id: &str,
    status: TableStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE restaurant_tables SET status = $1 WHERE id = $2")
        .bind(status)
        .bind(id)
        .execute(ex)
        .await?;
    Ok(())
}
