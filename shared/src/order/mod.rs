//! Order / table lifecycle types
//!
//! The status machine that keeps `Order.status` and `RestaurantTable.status`
//! mutually consistent lives here as pure types and guards; the server's
//! transactional workflows drive it.

pub mod types;

pub use types::{OrderRequestStatus, OrderStatus, TableStatus, TableType};
