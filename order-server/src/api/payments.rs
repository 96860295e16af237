//! Payment API handlers
//!
//! POST /payments/checkout     — create a gateway order for a plan
//! POST /payments/{id}/verify  — verify the gateway payment, activate
//!                               the subscription
//! POST /payments/webhook      — signature-verified gateway events
//!
//! Verification always compares the gateway-reported amount, currency
//! and plan against the locally stored expected payment before marking
//! it verified.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Extension, Json, Router};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Payment, Subscription};
use shared::util;

use crate::auth::RestaurantIdentity;
use crate::db;
use crate::error::ServiceError;
use crate::gateway;
use crate::state::AppState;

const SUBSCRIPTION_PERIOD_MS: i64 = 30 * 24 * 60 * 60 * 1000;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payments/checkout", post(checkout))
        .route("/payments/{id}/verify", post(verify))
}

/// Webhook lives on the public router: the gateway authenticates with
/// its signature, not a session
pub fn webhook_router() -> Router<AppState> {
    Router::new().route("/payments/webhook", post(webhook))
}

#[derive(serde::Deserialize)]
struct CheckoutRequest {
    plan_id: String,
}

#[derive(Serialize)]
struct VerifyResponse {
    payment: Payment,
    subscription: Subscription,
}

/// POST /payments/checkout
async fn checkout(
    State(state): State<AppState>,
    Extension(identity): Extension<RestaurantIdentity>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<Payment>, ServiceError> {
    let plan = db::plans::find_by_id(&state.pool, &req.plan_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PlanNotFound))?;

    let gateway_order = state
        .gateway
        .create_order(plan.amount, &plan.currency, &plan.id)
        .await?;

    let payment = Payment {
        id: db::new_id(),
        restaurant_id: identity.restaurant_id.clone(),
        plan_id: plan.id.clone(),
        gateway_order_id: gateway_order.id,
        amount: plan.amount,
        currency: plan.currency.clone(),
        status: "created".to_string(),
        created_at: util::now_millis(),
    };
    db::payments::insert(&state.pool, &payment).await?;

    tracing::info!(
        payment_id = %payment.id,
        plan = %plan.id,
        "Checkout created"
    );
    Ok(Json(payment))
}

/// POST /payments/{id}/verify
async fn verify(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(identity): Extension<RestaurantIdentity>,
) -> Result<Json<VerifyResponse>, ServiceError> {
    let payment = db::payments::find_by_id(&state.pool, &identity.restaurant_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PaymentNotFound))?;

    if payment.status == "verified" {
        return Err(AppError::new(ErrorCode::PaymentAlreadyVerified).into());
    }

    let (payment, subscription) = verify_and_activate(&state, payment).await?;
    Ok(Json(VerifyResponse {
        payment,
        subscription,
    }))
}

/// POST /payments/webhook
async fn webhook(
    State(state): State<AppState>,
    headers: http::HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let signature = headers
        .get("x-gateway-signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    gateway::verify_webhook_signature(&body, signature, &state.gateway_webhook_secret)
        .map_err(|e| AppError::with_message(ErrorCode::TokenInvalid, e))?;

    let event: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::validation("Invalid webhook payload"))?;
    let event_type = event["event"].as_str().unwrap_or_default().to_string();
    let gateway_order_id = event["data"]["order_id"].as_str().unwrap_or_default();

    let Some(payment) =
        db::payments::find_by_gateway_order_id(&state.pool, gateway_order_id).await?
    else {
        // Unknown order — acknowledge so the gateway stops retrying
        tracing::warn!(gateway_order_id, "Webhook for unknown payment");
        return Ok(Json(serde_json::json!({ "received": true })));
    };

    match event_type.as_str() {
        "payment.captured" => {
            if payment.status != "verified" {
                verify_and_activate(&state, payment).await?;
            }
        }
        "payment.failed" => {
            db::payments::set_status(&state.pool, &payment.id, "failed").await?;
            if let Some(restaurant) =
                db::restaurants::find_by_id(&state.pool, &payment.restaurant_id).await?
                && let Err(e) = crate::email::send_payment_failed(
                    &state.ses,
                    &state.ses_from_email,
                    &restaurant.email,
                )
                .await
            {
                tracing::warn!(error = %e, "Payment failed email not sent");
            }
        }
        other => {
            tracing::debug!(event = other, "Ignoring webhook event");
        }
    }

    Ok(Json(serde_json::json!({ "received": true })))
}

/// Compare the gateway's view of the order against the expected payment
/// and, on a match, mark it verified and activate the subscription
async fn verify_and_activate(
    state: &AppState,
    payment: Payment,
) -> Result<(Payment, Subscription), ServiceError> {
    let gateway_order = state.gateway.fetch_order(&payment.gateway_order_id).await?;

    if gateway_order.status != "paid" {
        return Err(AppError::new(ErrorCode::PaymentFailed).into());
    }

    let matches = gateway_order.amount == payment.amount
        && gateway_order.currency.eq_ignore_ascii_case(&payment.currency)
        && gateway_order.plan_id.as_deref() == Some(payment.plan_id.as_str());
    if !matches {
        tracing::warn!(
            payment_id = %payment.id,
            expected_amount = payment.amount,
            reported_amount = gateway_order.amount,
            "Gateway payment mismatch"
        );
        db::payments::set_status(&state.pool, &payment.id, "failed").await?;
        return Err(AppError::new(ErrorCode::PaymentMismatch).into());
    }

    db::payments::set_status(&state.pool, &payment.id, "verified").await?;

    let now = util::now_millis();
    db::subscriptions::create(
        &state.pool,
        &db::subscriptions::CreateSubscription {
            // Keyed by the gateway order so webhook + manual verify stay
            // idempotent
            id: &payment.gateway_order_id,
            restaurant_id: &payment.restaurant_id,
            plan_id: &payment.plan_id,
            current_period_end: Some(now + SUBSCRIPTION_PERIOD_MS),
            now,
        },
    )
    .await?;

    let subscription = db::subscriptions::get_active(&state.pool, &payment.restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::InternalError))?;

    if let Some(restaurant) =
        db::restaurants::find_by_id(&state.pool, &payment.restaurant_id).await?
    {
        let plan_name = db::plans::find_by_id(&state.pool, &payment.plan_id)
            .await?
            .map(|p| p.name)
            .unwrap_or_else(|| payment.plan_id.clone());
        if let Err(e) = crate::email::send_subscription_activated(
            &state.ses,
            &state.ses_from_email,
            &restaurant.email,
            &plan_name,
        )
        .await
        {
            tracing::warn!(error = %e, "Subscription activated email not sent");
        }
    }

    tracing::info!(payment_id = %payment.id, "Payment verified, subscription active");
    let payment = Payment {
        status: "verified".to_string(),
        ..payment
    };
    Ok((payment, subscription))
}
