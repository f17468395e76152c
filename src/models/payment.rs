use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Billing details collected by the checkout form. Card data never reaches
/// this service; these fields are only a snapshot for the payment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingInfo {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub zip_code: String,
}

/// The address portion of [`BillingInfo`], persisted as JSON on the payment
/// row. Field names match what the checkout client sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
    pub address: String,
    pub city: String,
    pub country: String,
    pub zip_code: String,
}

impl From<&BillingInfo> for BillingAddress {
    fn from(info: &BillingInfo) -> Self {
        Self {
            address: info.address.clone(),
            city: info.city.clone(),
            country: info.country.clone(),
            zip_code: info.zip_code.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
        }
    }
}

/// A local record of a processor-side payment intent.
///
/// Created `pending` by the intent service; moved to `succeeded` only after
/// the confirmation service has re-verified the intent with the processor.
/// `succeeded` is terminal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub stripe_payment_intent_id: String,
    pub stripe_session_id: Option<String>,
    pub user_email: String,
    pub full_name: String,
    pub billing_address: Json<BillingAddress>,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for inserting a fresh `pending` payment row.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub stripe_payment_intent_id: String,
    pub user_email: String,
    pub full_name: String,
    pub billing_address: BillingAddress,
    pub amount: i64,
    pub currency: String,
}
