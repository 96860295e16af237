//! Restaurant Table Model

use crate::order::{TableStatus, TableType};
use serde::{Deserialize, Serialize};

/// Restaurant table entity (桌台)
///
/// At most one non-terminal order may be associated with a table at a
/// time; the server's lifecycle workflows enforce this.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RestaurantTable {
    pub id: String,
    pub restaurant_id: String,
    pub table_type: TableType,
    pub number: i32,
    pub status: TableStatus,
    /// Token embedded in the table's printed QR code
    pub qr_token: String,
    pub created_at: i64,
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCreate {
    pub table_type: TableType,
    pub number: i32,
}

/// Update table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableUpdate {
    pub table_type: Option<TableType>,
    pub number: Option<i32>,
}
