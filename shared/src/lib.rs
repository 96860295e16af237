//! Shared domain types for the QR table-ordering platform
//!
//! # 模块结构
//!
//! - **error**: unified error codes, HTTP mapping and API error body
//! - **order**: order / table / order-request status machine
//! - **models**: entity types shared between server and clients
//! - **qr**: per-table QR token codec
//! - **util**: small helpers (timestamps)
//!
//! Database derives (`sqlx::FromRow`, `sqlx::Type`) are gated behind the
//! `db` feature so client-side consumers stay free of sqlx.

pub mod error;
pub mod models;
pub mod order;
pub mod qr;
pub mod util;

// Re-export 公共类型
pub use error::{AppError, AppResult, ErrorCode};
pub use order::{OrderRequestStatus, OrderStatus, TableStatus, TableType};
