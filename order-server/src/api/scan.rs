//! QR scan entry and customer order-session endpoints
//!
//! No JWT here: possession of the printed QR token (and then the order
//! id it resolves to) is the customer's credential. Endpoints on a
//! terminal order answer 410 Gone so clients can tell "session over"
//! from "never existed".

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use shared::models::{CartItem, MenuCategory, MenuItem, Order, OrderRequest};

use crate::cache::ResponseCache;
use crate::db;
use crate::error::ServiceError;
use crate::orders::{self, lifecycle, requests};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/scan", post(scan))
        .route("/sessions/{order_id}", get(get_session))
        .route("/sessions/{order_id}/menu", get(get_menu))
        .route("/sessions/{order_id}/requests", post(place_request))
        .route(
            "/sessions/{order_id}/requests/{request_id}/rejection-displayed",
            post(rejection_displayed),
        )
        .route("/sessions/{order_id}/request-payment", post(request_payment))
        .route("/sessions/{order_id}/cancel", post(cancel))
}

// ── Request / Response types ──

#[derive(Deserialize)]
struct ScanRequest {
    token: String,
}

#[derive(Serialize)]
struct ScanResponse {
    order: Order,
    /// False when the scan resumed an existing session
    created: bool,
}

#[derive(Serialize)]
struct SessionResponse {
    order: Order,
    requests: Vec<OrderRequest>,
}

#[derive(Serialize, Deserialize)]
struct MenuResponse {
    categories: Vec<MenuCategory>,
    items: Vec<MenuItem>,
}

#[derive(Deserialize)]
struct PlaceRequestBody {
    items: Vec<CartItem>,
}

// ── Handlers ──

/// POST /scan — activate the table (or resume its active session)
async fn scan(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ServiceError> {
    let outcome = lifecycle::activate_by_scan(&state.pool, &req.token).await?;
    Ok(Json(ScanResponse {
        order: outcome.order,
        created: outcome.created,
    }))
}

/// GET /sessions/{order_id} — the order and its rounds
async fn get_session(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<SessionResponse>, ServiceError> {
    let order = requests::load_open_session(&state.pool, &order_id).await?;
    let rounds = db::order_requests::list_by_order(&state.pool, &order.id).await?;
    Ok(Json(SessionResponse {
        order,
        requests: rounds,
    }))
}

/// GET /sessions/{order_id}/menu — the restaurant's menu, cached per
/// restaurant with a TTL and invalidated on menu writes
async fn get_menu(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<MenuResponse>, ServiceError> {
    let order = requests::load_open_session(&state.pool, &order_id).await?;

    let cache_key = ResponseCache::key(&order.restaurant_id, "menu");
    if let Some(cached) = state.cache.get(&cache_key).await
        && let Ok(menu) = serde_json::from_value::<MenuResponse>(cached)
    {
        return Ok(Json(menu));
    }

    let menu = MenuResponse {
        categories: db::menu::list_categories(&state.pool, &order.restaurant_id).await?,
        items: db::menu::list_items(&state.pool, &order.restaurant_id).await?,
    };

    if let Ok(value) = serde_json::to_value(&menu) {
        state.cache.put(cache_key, value).await;
    }
    Ok(Json(menu))
}

/// POST /sessions/{order_id}/requests — submit a cart
async fn place_request(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(body): Json<PlaceRequestBody>,
) -> Result<Json<OrderRequest>, ServiceError> {
    let request = orders::place_request(&state.pool, &order_id, &body.items).await?;
    Ok(Json(request))
}

/// POST /sessions/{order_id}/requests/{request_id}/rejection-displayed
async fn rejection_displayed(
    State(state): State<AppState>,
    Path((order_id, request_id)): Path<(String, String)>,
) -> Result<Json<OrderRequest>, ServiceError> {
    let request =
        orders::mark_rejection_displayed(&state.pool, &order_id, &request_id).await?;
    Ok(Json(request))
}

/// POST /sessions/{order_id}/request-payment — customer asks for the bill
async fn request_payment(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, ServiceError> {
    let order = lifecycle::request_payment(&state.pool, &order_id).await?;
    Ok(Json(order))
}

/// POST /sessions/{order_id}/cancel — customer abandons the visit
async fn cancel(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, ServiceError> {
    let order = lifecycle::cancel(&state.pool, &order_id).await?;
    Ok(Json(order))
}
