//! Order lifecycle workflows
//!
//! Keeps `Order.status` and `RestaurantTable.status` mutually consistent
//! as customers and staff interact:
//!
//! | trigger | order | table |
//! |---------|-------|-------|
//! | QR scan (table AVAILABLE) | → ORDERED | → OCCUPIED |
//! | owner reserves | → PENDING | → RESERVED |
//! | reserved customer arrives | PENDING → ORDERED | RESERVED → OCCUPIED |
//! | bill requested | ORDERED → PAYMENT_REQUESTED | unchanged |
//! | payment recorded | PAYMENT_REQUESTED → COMPLETED | → AVAILABLE |
//! | cancelled | PENDING/ORDERED → CANCELLED | → AVAILABLE |
//!
//! Every compound transition runs inside a single database transaction;
//! business-rule violations surface immediately and are never retried.

pub mod lifecycle;
pub mod requests;

pub use lifecycle::{
    activate_by_scan, cancel, complete, confirm_reservation, request_payment, reserve,
    set_table_availability,
};
pub use requests::{
    accept_request, mark_rejection_displayed, place_request, reject_request,
};
