//! Payment processor abstraction.
//!
//! The services talk to the processor through this trait so the checkout
//! flow can be exercised against a scripted processor in tests while
//! production wires in the Stripe client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::AppError;

/// Lifecycle states a processor-side payment intent can report.
/// Anything other than `Succeeded` means the charge has not settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    #[serde(other)]
    Unknown,
}

/// The slice of a processor payment-intent object this service cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    pub status: IntentStatus,
}

/// Metadata attached to every intent so the charge can be reconciled from
/// the processor dashboard even if local state is lost.
#[derive(Debug, Clone)]
pub struct IntentMetadata {
    pub event_id: Uuid,
    pub event_name: String,
    pub quantity: i32,
    pub user_email: String,
}

#[derive(Debug, Clone)]
pub struct CreateIntent {
    pub amount: i64,
    pub currency: String,
    pub metadata: IntentMetadata,
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Opens a payment intent for the given amount. No local state is
    /// written by this call.
    async fn create_intent(&self, request: &CreateIntent) -> Result<PaymentIntent, AppError>;

    /// Fetches the current state of an intent directly from the processor.
    /// Confirmation never trusts a client-supplied success flag.
    async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, AppError>;
}
