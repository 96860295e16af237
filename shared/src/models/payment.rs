//! Payment Model

use serde::{Deserialize, Serialize};

/// Expected payment stored before redirecting to the gateway
///
/// `status` lifecycle: "created" → "verified" | "failed". Verification
/// compares the gateway-reported amount/currency/plan against this row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: String,
    pub restaurant_id: String,
    pub plan_id: String,
    /// Order id issued by the payment gateway
    pub gateway_order_id: String,
    /// Expected amount in minor currency units
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub created_at: i64,
}
