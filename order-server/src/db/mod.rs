//! Database access layer
//!
//! Per-entity modules wrapping sqlx calls. Functions that participate in
//! the lifecycle transactions take an `impl PgExecutor` so they run
//! against either the pool or an open transaction.

pub mod email_verifications;
pub mod menu;
pub mod order_requests;
pub mod orders;
pub mod payments;
pub mod plans;
pub mod restaurants;
pub mod subscriptions;
pub mod tables;

/// Generate an entity id
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
