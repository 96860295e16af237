//! Subscription Plan Model

use serde::{Deserialize, Serialize};

/// Plan entity — what a restaurant subscribes to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Plan {
    pub id: String,
    pub name: String,
    /// Monthly price in minor currency units
    pub amount: i64,
    /// ISO currency code, lowercase ("jpy", "usd")
    pub currency: String,
    pub max_tables: i32,
}
