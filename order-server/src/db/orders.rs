//! Order database operations
//!
//! Order rows are never deleted — terminal orders remain as history.

use shared::models::Order;
use shared::order::OrderStatus;
use sqlx::{PgExecutor, PgPool};

const ORDER_COLUMNS: &str =
    "id, restaurant_id, table_id, status, customer_name, created_at, updated_at";

pub async fn find_by_id<'e>(
    ex: impl PgExecutor<'e>,
    id: &str,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
        .bind(id)
        .fetch_optional(ex)
        .await
}

/// The active (non-terminal) order occupying a table, if any
///
/// This is the check half of the check-then-act activation guard; no
/// row lock is taken between it and the subsequent insert.
pub async fn find_active_by_table<'e>(
    ex: impl PgExecutor<'e>,
    table_id: &str,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders
         WHERE table_id = $1 AND status IN ('PENDING', 'ORDERED', 'PAYMENT_REQUESTED')
         LIMIT 1"
    ))
    .bind(table_id)
    .fetch_optional(ex)
    .await
}

pub async fn list_by_restaurant(
    pool: &PgPool,
    restaurant_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders
         WHERE restaurant_id = $1
         ORDER BY created_at DESC
         LIMIT $2 OFFSET $3"
    ))
    .bind(restaurant_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn insert<'e>(ex: impl PgExecutor<'e>, order: &Order) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO orders (id, restaurant_id, table_id, status, customer_name, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(&order.id)
    .bind(&order.restaurant_id)
    .bind(&order.table_id)
    .bind(order.status)
    .bind(&order.customer_name)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn set_status<'e>(
    ex: impl PgExecutor<'e>,
    id: &str,
    status: OrderStatus,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE orders SET status = $1, updated_at = $2 WHERE id = $3")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(ex)
        .await?;
    Ok(())
}
