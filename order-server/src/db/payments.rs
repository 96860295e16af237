//! Payment database operations

use shared::models::Payment;
use sqlx::PgPool;

const PAYMENT_COLUMNS: &str =
    "id, restaurant_id, plan_id, gateway_order_id, amount, currency, status, created_at";

pub async fn insert(pool: &PgPool, payment: &Payment) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO payments (id, restaurant_id, plan_id, gateway_order_id, amount, currency, status, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(&payment.id)
    .bind(&payment.restaurant_id)
    .bind(&payment.plan_id)
    .bind(&payment.gateway_order_id)
    .bind(payment.amount)
    .bind(&payment.currency)
    .bind(&payment.status)
    .bind(payment.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_id(
    pool: &PgPool,
    restaurant_id: &str,
    id: &str,
) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1 AND restaurant_id = $2"
    ))
    .bind(id)
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_gateway_order_id(
    pool: &PgPool,
    gateway_order_id: &str,
) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {PAYMENT_COLUMNS} FROM payments WHERE gateway_order_id = $1"
    ))
    .bind(gateway_order_id)
    .fetch_optional(pool)
    .await
}

pub async fn set_status(pool: &PgPool, id: &str, status: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE payments SET status = $1 WHERE id = $2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
