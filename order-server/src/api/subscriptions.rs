//! Subscription API handlers (dashboard)

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use shared::error::{AppError, ErrorCode};
use shared::models::Subscription;

use crate::auth::RestaurantIdentity;
use crate::db;
use crate::email;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subscriptions/current", get(current))
        .route("/subscriptions/cancel", post(cancel))
}

/// GET /subscriptions/current — the active subscription, 404 when none
async fn current(
    State(state): State<AppState>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<Subscription>, ServiceError> {
    let subscription = db::subscriptions::get_active(&state.pool, &identity.restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NotFound))?;
    Ok(Json(subscription))
}

/// POST /subscriptions/cancel — owner cancels the active subscription
async fn cancel(
    State(state): State<AppState>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<Subscription>, ServiceError> {
    let subscription = db::subscriptions::get_active(&state.pool, &identity.restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NotFound))?;

    db::subscriptions::update_status(&state.pool, &subscription.id, "canceled").await?;

    if let Err(e) =
        email::send_subscription_canceled(&state.ses, &state.ses_from_email, &identity.email).await
    {
        tracing::warn!(error = %e, "Subscription canceled email not sent");
    }

    tracing::info!(
        restaurant_id = %identity.restaurant_id,
        subscription_id = %subscription.id,
        "Subscription canceled"
    );
    Ok(Json(Subscription {
        status: "canceled".to_string(),
        ..subscription
    }))
}
