//! Restaurant profile API handlers (dashboard)
//!
//! The profile carries the business-hours window and holiday list the
//! QR-scan entry point enforces.

use axum::extract::State;
use axum::routing::get;
use axum::{Extension, Json, Router};
use shared::error::{AppError, ErrorCode};
use shared::models::{Restaurant, RestaurantUpdate};

use crate::auth::RestaurantIdentity;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurants/me", get(me).patch(update))
}

/// GET /restaurants/me
async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<Restaurant>, ServiceError> {
    let restaurant = db::restaurants::find_by_id(&state.pool, &identity.restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    Ok(Json(restaurant))
}

/// PATCH /restaurants/me — profile, business hours, holidays
async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<RestaurantIdentity>,
    Json(payload): Json<RestaurantUpdate>,
) -> Result<Json<Restaurant>, ServiceError> {
    for time in [&payload.open_time, &payload.close_time].into_iter().flatten() {
        if !is_hhmm(time) {
            return Err(AppError::validation("Times must be HH:MM").into());
        }
    }
    if let Some(holidays) = &payload.holidays {
        for day in holidays {
            if chrono::NaiveDate::parse_from_str(day, "%Y-%m-%d").is_err() {
                return Err(AppError::validation("Holidays must be YYYY-MM-DD").into());
            }
        }
    }

    let restaurant =
        db::restaurants::update_profile(&state.pool, &identity.restaurant_id, &payload)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    Ok(Json(restaurant))
}

fn is_hhmm(s: &str) -> bool {
    chrono::NaiveTime::parse_from_str(s, "%H:%M").is_ok()
}
