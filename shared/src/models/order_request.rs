//! Order Request Model
//!
//! One request = one submitted cart (a single ordering round within an
//! order). Item names and prices are snapshotted at request time so
//! history stays stable when the menu changes later.

use crate::order::OrderRequestStatus;
use serde::{Deserialize, Serialize};

/// Order request entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderRequest {
    pub id: String,
    pub order_id: String,
    pub status: OrderRequestStatus,
    /// Staff-entered reason when the request was rejected
    pub rejection_reason: Option<String>,
    /// Whether the rejection banner has been shown to the customer
    pub rejection_displayed: bool,
    pub created_at: i64,

    // -- Relations (populated by application code, skipped by FromRow) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Snapshotted line item — immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_request_id: String,
    /// Originating menu item, kept for analytics; the snapshot below is
    /// what billing uses
    pub menu_item_id: Option<String>,
    pub name: String,
    /// Unit price in minor currency units at request time
    pub unit_price: i64,
    pub quantity: i32,

    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub options: Vec<OrderItemOption>,
}

/// Snapshotted selected option — immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItemOption {
    pub id: String,
    pub order_item_id: String,
    pub name: String,
    /// Price delta in minor currency units at request time
    pub price: i64,
}

/// One cart line as submitted by the customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub menu_item_id: String,
    pub quantity: i32,
    #[serde(default)]
    pub option_ids: Vec<String>,
}
