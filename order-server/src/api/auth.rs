//! Authentication API handlers
//!
//! POST /auth/register     — create restaurant + send verification code
//! POST /auth/verify-email — verify code → session token
//! POST /auth/resend-code  — resend verification code
//! POST /auth/login        — email/password → session token
//! POST /auth/refresh      — re-issue a session with fresh flags

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::util;

use crate::auth::session;
use crate::db;
use crate::email;
use crate::error::ServiceError;
use crate::state::AppState;

const CODE_TTL_MS: i64 = 5 * 60 * 1000;
const MAX_CODE_ATTEMPTS: i32 = 5;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/verify-email", post(verify_email))
        .route("/auth/resend-code", post(resend_code))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

// ── Request / Response types ──

#[derive(Deserialize)]
struct RegisterRequest {
    email: String,
    password: String,
    name: String,
}

#[derive(Deserialize)]
struct VerifyRequest {
    email: String,
    code: String,
}

#[derive(Deserialize)]
struct ResendRequest {
    email: String,
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct RegisterResponse {
    restaurant_id: String,
    message: String,
}

/// Session payload consumed by page-level guards
#[derive(Serialize)]
struct SessionResponse {
    token: String,
    email_verified: bool,
    subscribed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_url: Option<String>,
}

// ── Helpers ──

fn generate_code() -> String {
    use rand::Rng;
    let code: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    code.to_string()
}

fn hash_secret(secret: &str) -> Result<String, AppError> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "Password hash error");
            AppError::new(ErrorCode::InternalError)
        })
}

fn verify_secret(secret: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok()
}

fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("Invalid email"));
    }
    Ok(email)
}

async fn session_response(
    state: &AppState,
    restaurant_id: &str,
    email: &str,
    email_verified: bool,
) -> Result<SessionResponse, ServiceError> {
    let subscribed = db::subscriptions::get_active(&state.pool, restaurant_id)
        .await?
        .is_some();

    let token = session::create_token(
        restaurant_id,
        email,
        email_verified,
        subscribed,
        &state.jwt_secret,
    )
    .map_err(|e| {
        tracing::error!(error = %e, "Session token generation failed");
        AppError::new(ErrorCode::InternalError)
    })?;

    let redirect_url = if !email_verified {
        Some("/verify-email".to_string())
    } else if !subscribed {
        Some("/plans".to_string())
    } else {
        None
    };

    Ok(SessionResponse {
        token,
        email_verified,
        subscribed,
        redirect_url,
    })
}

async fn send_fresh_code(state: &AppState, email: &str) -> Result<(), ServiceError> {
    let code = generate_code();
    let code_hash = hash_secret(&code)?;
    let now = util::now_millis();

    db::email_verifications::upsert(&state.pool, email, &code_hash, now + CODE_TTL_MS, now)
        .await?;

    email::send_verification_code(&state.ses, &state.ses_from_email, email, &code)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to send verification email");
            AppError::new(ErrorCode::EmailSendFailed)
        })?;
    Ok(())
}

// ── Handlers ──

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ServiceError> {
    let email = normalize_email(&req.email)?;
    if req.password.len() < 8 {
        return Err(AppError::validation("Password must be at least 8 characters").into());
    }
    if req.name.trim().is_empty() {
        return Err(AppError::validation("Restaurant name must not be empty").into());
    }

    if db::restaurants::find_account_by_email(&state.pool, &email)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered).into());
    }

    let restaurant_id = db::new_id();
    let password_hash = hash_secret(&req.password)?;
    db::restaurants::create(
        &state.pool,
        &restaurant_id,
        &email,
        &password_hash,
        req.name.trim(),
        util::now_millis(),
    )
    .await?;

    send_fresh_code(&state, &email).await?;

    tracing::info!(restaurant_id = %restaurant_id, email = %email, "Restaurant registered");
    Ok(Json(RegisterResponse {
        restaurant_id,
        message: "Verification code sent to your email".to_string(),
    }))
}

async fn verify_email(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<SessionResponse>, ServiceError> {
    let email = normalize_email(&req.email)?;

    let account = db::restaurants::find_account_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let verification = db::email_verifications::find(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::VerificationCodeInvalid))?;

    if verification.attempts >= MAX_CODE_ATTEMPTS {
        return Err(AppError::new(ErrorCode::TooManyAttempts).into());
    }
    if verification.expires_at < util::now_millis() {
        return Err(AppError::new(ErrorCode::VerificationCodeExpired).into());
    }
    if !verify_secret(req.code.trim(), &verification.code) {
        db::email_verifications::increment_attempts(&state.pool, &email).await?;
        return Err(AppError::new(ErrorCode::VerificationCodeInvalid).into());
    }

    db::restaurants::mark_email_verified(&state.pool, &account.id).await?;
    db::email_verifications::delete(&state.pool, &email).await?;

    tracing::info!(restaurant_id = %account.id, "Email verified");
    Ok(Json(session_response(&state, &account.id, &email, true).await?))
}

async fn resend_code(
    State(state): State<AppState>,
    Json(req): Json<ResendRequest>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let email = normalize_email(&req.email)?;

    let account = db::restaurants::find_account_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    if account.email_verified {
        return Err(AppError::conflict("Email already verified").into());
    }

    send_fresh_code(&state, &email).await?;
    Ok(Json(serde_json::json!({ "message": "Verification code sent" })))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ServiceError> {
    let email = normalize_email(&req.email)?;

    let account = db::restaurants::find_account_by_email(&state.pool, &email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_secret(&req.password, &account.password) {
        return Err(AppError::invalid_credentials().into());
    }

    Ok(Json(
        session_response(&state, &account.id, &email, account.email_verified).await?,
    ))
}

/// Re-issue a session from a still-valid token, refreshing the
/// completeness flags from the database (used after email verification
/// or checkout)
async fn refresh(
    State(state): State<AppState>,
    headers: http::HeaderMap,
) -> Result<Json<SessionResponse>, ServiceError> {
    let token = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized().with_redirect("/login"))?;

    let claims = session::verify_token(token, &state.jwt_secret)?;

    let account = db::restaurants::find_account_by_email(&state.pool, &claims.email)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    Ok(Json(
        session_response(&state, &account.id, &account.email, account.email_verified).await?,
    ))
}
