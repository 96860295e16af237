//! Order Model

use crate::order::OrderStatus;
use serde::{Deserialize, Serialize};

/// Order entity — one customer visit/session at a table
///
/// Orders are never physically deleted; terminal orders remain as
/// history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub restaurant_id: String,
    pub table_id: String,
    pub status: OrderStatus,
    /// Set when the order was created by an owner reservation
    pub customer_name: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}
