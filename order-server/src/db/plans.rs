//! Plan database operations

use shared::models::Plan;
use sqlx::PgPool;

pub async fn list(pool: &PgPool) -> Result<Vec<Plan>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, amount, currency, max_tables FROM plans ORDER BY amount")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Plan>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, amount, currency, max_tables FROM plans WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
