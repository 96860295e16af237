//! Unified service-layer error type
//!
//! `ServiceError` bridges the gap between db-layer errors (`sqlx::Error`)
//! and the API-layer error (`AppError`). It enables `?` propagation
//! without manual `.map_err(|e| { tracing::error!(...); ... })`
//! boilerplate in every handler.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

/// Service-layer error — only two variants, keeps things simple.
///
/// - `Db`: database/infrastructure errors (auto-logged, mapped by kind)
/// - `App`: business-rule errors (transparent pass-through to client)
#[derive(Debug)]
pub enum ServiceError {
    /// Database error (sqlx)
    Db(sqlx::Error),
    /// Business-rule error (already an AppError with the correct ErrorCode)
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => translate_sqlx(db_err),
        }
    }
}

/// Translate low-level sqlx errors into the error taxonomy
///
/// - `RowNotFound` → NotFound (callers that know the resource name use
///   `fetch_optional` + a specific code instead)
/// - unique-constraint violation (23505) → AlreadyExists
/// - everything else → DatabaseError, logged here
fn translate_sqlx(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::new(ErrorCode::NotFound),
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            AppError::new(ErrorCode::AlreadyExists)
        }
        _ => {
            tracing::error!(error = %err, "Service database error");
            AppError::new(ErrorCode::DatabaseError)
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
