//! Subscription database operations

use shared::models::Subscription;
use sqlx::PgPool;

pub struct CreateSubscription<'a> {
    pub id: &'a str,
    pub restaurant_id: &'a str,
    pub plan_id: &'a str,
    pub current_period_end: Option<i64>,
    pub now: i64,
}

pub async fn create(pool: &PgPool, sub: &CreateSubscription<'_>) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO subscriptions (id, restaurant_id, plan_id, status, current_period_end, created_at)
         VALUES ($1, $2, $3, 'active', $4, $5)
         ON CONFLICT (id) DO UPDATE SET
            status = 'active', plan_id = $3, current_period_end = $4",
    )
    .bind(sub.id)
    .bind(sub.restaurant_id)
    .bind(sub.plan_id)
    .bind(sub.current_period_end)
    .bind(sub.now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn update_status(
    pool: &PgPool,
    subscription_id: &str,
    status: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE subscriptions SET status = $1 WHERE id = $2")
        .bind(status)
        .bind(subscription_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// 获取餐厅当前有效订阅
pub async fn get_active(
    pool: &PgPool,
    restaurant_id: &str,
) -> Result<Option<Subscription>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, restaurant_id, plan_id, status, current_period_end, created_at
         FROM subscriptions
         WHERE restaurant_id = $1 AND status = 'active'
         ORDER BY created_at DESC
         LIMIT 1",
    )
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await
}
