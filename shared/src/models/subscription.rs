//! Subscription Model

use serde::{Deserialize, Serialize};

/// Subscription record
///
/// `status` follows the gateway's vocabulary: "active" | "canceled".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Subscription {
    pub id: String,
    pub restaurant_id: String,
    pub plan_id: String,
    pub status: String,
    pub current_period_end: Option<i64>,
    pub created_at: i64,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}
