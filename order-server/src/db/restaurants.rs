//! Restaurant database operations

use shared::models::{Restaurant, RestaurantUpdate};
use sqlx::PgPool;

const RESTAURANT_COLUMNS: &str =
    "id, email, name, address, open_time, close_time, holidays, email_verified, created_at";

/// Account row used by the auth flow only — the password hash never
/// leaves this module's callers.
#[derive(sqlx::FromRow)]
pub struct AccountRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub email_verified: bool,
}

pub async fn create(
    pool: &PgPool,
    id: &str,
    email: &str,
    password_hash: &str,
    name: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO restaurants (id, email, password, name, created_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_account_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<AccountRow>, sqlx::Error> {
    sqlx::query_as("SELECT id, email, password, email_verified FROM restaurants WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn mark_email_verified(pool: &PgPool, id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE restaurants SET email_verified = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_profile(
    pool: &PgPool,
    id: &str,
    data: &RestaurantUpdate,
) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query(
        "UPDATE restaurants SET
            name = COALESCE($1, name),
            address = COALESCE($2, address),
            open_time = COALESCE($3, open_time),
            close_time = COALESCE($4, close_time),
            holidays = COALESCE($5, holidays)
         WHERE id = $6",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.open_time)
    .bind(&data.close_time)
    .bind(&data.holidays)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await
}
