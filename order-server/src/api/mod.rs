//! API routes
//!
//! # 结构
//!
//! Customer-facing (no JWT; possession of the QR token / order id is
//! the credential):
//! - [`scan`] - QR scan entry + order-session endpoints
//! - [`plans`] - public plan listing
//! - [`health`] - health check
//!
//! Restaurant dashboard (JWT session):
//! - [`tables`] - table management, reservation, availability
//! - [`orders`] - order history and staff lifecycle actions
//! - [`order_requests`] - staff queue, accept/reject
//! - [`categories`] / [`menu_items`] - menu management
//! - [`uploads`] - menu/category images
//! - [`restaurants`] - profile, business hours, holidays
//! - [`subscriptions`] / [`payments`] - billing
//! - [`auth`] - register/login/verify/refresh

pub mod auth;
pub mod categories;
pub mod health;
pub mod menu_items;
pub mod order_requests;
pub mod orders;
pub mod payments;
pub mod plans;
pub mod restaurants;
pub mod scan;
pub mod subscriptions;
pub mod tables;
pub mod uploads;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{require_subscription, session_auth_middleware};
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Public surface (customers + pre-login owners)
    let public = Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(scan::router())
        .merge(plans::router())
        .merge(payments::webhook_router());

    // Dashboard resources requiring a complete account
    let dashboard = Router::new()
        .merge(tables::router())
        .merge(orders::router())
        .merge(order_requests::router())
        .merge(categories::router())
        .merge(menu_items::router())
        .merge(uploads::router())
        .layer(middleware::from_fn(require_subscription));

    // Profile and billing are reachable with a session alone, so owners
    // can finish setting up before subscribing
    let account = Router::new()
        .merge(restaurants::router())
        .merge(subscriptions::router())
        .merge(payments::router());

    let admin = dashboard.merge(account).layer(middleware::from_fn_with_state(
        state.clone(),
        session_auth_middleware,
    ));

    Router::new()
        .nest("/api/v1", public.merge(admin))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
