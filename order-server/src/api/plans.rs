//! Plan listing (public)

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use shared::models::Plan;

use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/plans", get(list))
}

/// GET /plans
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Plan>>, ServiceError> {
    let plans = db::plans::list(&state.pool).await?;
    Ok(Json(plans))
}
