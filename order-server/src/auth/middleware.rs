//! Session authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::{AppError, ErrorCode};

use crate::auth::{RestaurantIdentity, session};
use crate::state::AppState;

/// Middleware that extracts and verifies the session JWT from the
/// Authorization header and injects [`RestaurantIdentity`]
///
/// 401 responses carry a redirect hint to the login page.
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized().with_redirect("/login"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header").with_redirect("/login"))?;

    let claims = session::verify_token(token, &state.jwt_secret)?;
    request
        .extensions_mut()
        .insert(RestaurantIdentity::from(claims));

    Ok(next.run(request).await)
}

/// Middleware for dashboard resources that require a complete account
///
/// Rejects sessions whose email is unverified or that carried no active
/// subscription at issue time, with the redirect hint the client-side
/// guards consume. Flags are refreshed by `POST /auth/refresh` after
/// verification or checkout.
pub async fn require_subscription(request: Request, next: Next) -> Result<Response, AppError> {
    let identity = request
        .extensions()
        .get::<RestaurantIdentity>()
        .ok_or_else(|| AppError::unauthorized().with_redirect("/login"))?;

    match identity.redirect_hint() {
        None => Ok(next.run(request).await),
        Some(redirect) => {
            let code = if identity.email_verified {
                ErrorCode::SubscriptionRequired
            } else {
                ErrorCode::EmailNotVerified
            };
            Err(AppError::new(code).with_redirect(redirect))
        }
    }
}
