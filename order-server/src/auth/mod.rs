//! Restaurant authentication
//!
//! - [`session`]: JWT session tokens carrying the restaurant id and
//!   account-completeness flags
//! - [`middleware`]: axum layers injecting [`RestaurantIdentity`] and
//!   enforcing subscription state

pub mod middleware;
pub mod session;

pub use middleware::{require_subscription, session_auth_middleware};
pub use session::{RestaurantIdentity, SessionClaims, create_token, verify_token};
