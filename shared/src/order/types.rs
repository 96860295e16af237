//! Status enums and transition guards
//!
//! 状态机规则：
//! - 每张桌台同一时间最多一个未结订单 (PENDING / ORDERED / PAYMENT_REQUESTED)
//! - COMPLETED / CANCELLED 是终态，订单到达终态后桌台回到 AVAILABLE
//! - AVAILABLE ⇄ UNAVAILABLE 只能在无活跃订单时手动切换

use serde::{Deserialize, Serialize};

/// Physical table kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(
    feature = "db",
    sqlx(type_name = "table_type", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum TableType {
    Table,
    Counter,
}

/// Table status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(
    feature = "db",
    sqlx(type_name = "table_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
    Unavailable,
}

impl TableStatus {
    /// Whether an owner may manually toggle availability from this status
    ///
    /// Only AVAILABLE and UNAVAILABLE take part in the manual toggle; a
    /// table that is OCCUPIED or RESERVED is controlled by its order.
    pub fn can_toggle_availability(&self) -> bool {
        matches!(self, Self::Available | Self::Unavailable)
    }
}

/// Order status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(
    feature = "db",
    sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum OrderStatus {
    Pending,
    Ordered,
    PaymentRequested,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether the order still occupies its table
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Ordered | Self::PaymentRequested)
    }

    /// Whether the order has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Transition guard
    ///
    /// | from | allowed next |
    /// |------|--------------|
    /// | PENDING | ORDERED, CANCELLED |
    /// | ORDERED | PAYMENT_REQUESTED, CANCELLED |
    /// | PAYMENT_REQUESTED | COMPLETED |
    /// | COMPLETED / CANCELLED | (none) |
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Ordered)
                | (Self::Pending, Self::Cancelled)
                | (Self::Ordered, Self::PaymentRequested)
                | (Self::Ordered, Self::Cancelled)
                | (Self::PaymentRequested, Self::Completed)
        )
    }

    /// Table status implied by an order entering this status
    ///
    /// Returns `None` where the table keeps its current status
    /// (e.g. requesting the bill).
    pub fn implied_table_status(&self) -> Option<TableStatus> {
        match self {
            Self::Pending => Some(TableStatus::Reserved),
            Self::Ordered => Some(TableStatus::Occupied),
            Self::PaymentRequested => None,
            Self::Completed | Self::Cancelled => Some(TableStatus::Available),
        }
    }
}

/// Order request (one ordering round) status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(
    feature = "db",
    sqlx(type_name = "order_request_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum OrderRequestStatus {
    Placed,
    Accepted,
    Cancelled,
    Completed,
}

impl OrderRequestStatus {
    /// Staff may only act on requests still waiting in PLACED
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_and_terminal_are_disjoint() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Ordered,
            OrderStatus::PaymentRequested,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_ne!(status.is_active(), status.is_terminal());
        }
    }

    #[test]
    fn test_transition_table() {
        use OrderStatus::*;

        assert!(Pending.can_transition_to(Ordered));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Ordered.can_transition_to(PaymentRequested));
        assert!(Ordered.can_transition_to(Cancelled));
        assert!(PaymentRequested.can_transition_to(Completed));

        // Bill already requested — too late to cancel
        assert!(!PaymentRequested.can_transition_to(Cancelled));
        // No skipping straight to completed
        assert!(!Ordered.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(PaymentRequested));
        // Terminal states are final
        for next in [Pending, Ordered, PaymentRequested, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_terminal_frees_table() {
        assert_eq!(
            OrderStatus::Completed.implied_table_status(),
            Some(TableStatus::Available)
        );
        assert_eq!(
            OrderStatus::Cancelled.implied_table_status(),
            Some(TableStatus::Available)
        );
        // Requesting the bill leaves the table untouched
        assert_eq!(OrderStatus::PaymentRequested.implied_table_status(), None);
    }

    #[test]
    fn test_manual_toggle_guard() {
        assert!(TableStatus::Available.can_toggle_availability());
        assert!(TableStatus::Unavailable.can_toggle_availability());
        assert!(!TableStatus::Occupied.can_toggle_availability());
        assert!(!TableStatus::Reserved.can_toggle_availability());
    }

    #[test]
    fn test_serde_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::PaymentRequested).unwrap(),
            "\"PAYMENT_REQUESTED\""
        );
        assert_eq!(
            serde_json::from_str::<TableStatus>("\"UNAVAILABLE\"").unwrap(),
            TableStatus::Unavailable
        );
    }
}
