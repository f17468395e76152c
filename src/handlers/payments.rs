use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::BillingInfo;
use crate::state::AppState;
use crate::utils::error::AppError;

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub event_id: Uuid,
    pub billing_info: BillingInfo,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentResponse {
    pub client_secret: String,
    pub payment_id: Uuid,
    pub event_name: String,
    pub total_amount: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    pub payment_intent_id: String,
    pub payment_id: Uuid,
    pub event_id: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentResponse {
    pub success: bool,
    pub rsvp_id: Uuid,
    pub message: String,
}

pub async fn create_payment(
    State(state): State<AppState>,
    Json(body): Json<CreatePaymentRequest>,
) -> Result<Json<CreatePaymentResponse>, AppError> {
    let outcome = state
        .payments
        .create_payment(body.event_id, &body.billing_info, body.quantity)
        .await?;

    Ok(Json(CreatePaymentResponse {
        client_secret: outcome.client_secret,
        payment_id: outcome.payment_id,
        event_name: outcome.event_name,
        total_amount: outcome.total_amount,
    }))
}

pub async fn confirm_payment(
    State(state): State<AppState>,
    Json(body): Json<ConfirmPaymentRequest>,
) -> Result<Json<ConfirmPaymentResponse>, AppError> {
    let outcome = state
        .payments
        .confirm_payment(
            &body.payment_intent_id,
            body.payment_id,
            body.event_id,
            body.quantity,
        )
        .await?;

    Ok(Json(ConfirmPaymentResponse {
        success: true,
        rsvp_id: outcome.rsvp_id,
        message: "Payment confirmed and RSVP created successfully".to_string(),
    }))
}
