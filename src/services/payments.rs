//! The RSVP payment workflow: intent creation against seat inventory, and
//! confirmation that atomically records the RSVP and takes the seats.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::db::ReservationStore;
use crate::models::{BillingAddress, BillingInfo, NewPayment};
use crate::services::processor::{CreateIntent, IntentMetadata, IntentStatus, PaymentProcessor};
use crate::utils::error::AppError;
use crate::utils::money::format_minor_units;
use crate::utils::validation::{validate_billing_info, validate_quantity};

#[derive(Debug)]
pub struct CreatePaymentOutcome {
    pub client_secret: String,
    pub payment_id: Uuid,
    pub event_name: String,
    pub total_amount: i64,
}

#[derive(Debug)]
pub struct ConfirmPaymentOutcome {
    pub rsvp_id: Uuid,
}

pub struct PaymentService {
    store: Arc<dyn ReservationStore>,
    processor: Arc<dyn PaymentProcessor>,
    currency: String,
}

impl PaymentService {
    pub fn new(
        store: Arc<dyn ReservationStore>,
        processor: Arc<dyn PaymentProcessor>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            store,
            processor,
            currency: currency.into(),
        }
    }

    /// Opens a payment intent for `quantity` seats on an event and records
    /// it as a `pending` payment. The capacity check here is advisory; the
    /// binding check happens inside [`confirm_payment`](Self::confirm_payment).
    pub async fn create_payment(
        &self,
        event_id: Uuid,
        billing: &BillingInfo,
        quantity: i32,
    ) -> Result<CreatePaymentOutcome, AppError> {
        validate_quantity(quantity)?;
        validate_billing_info(billing)?;

        let event = self
            .store
            .find_event(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if quantity > event.seats_remaining() {
            return Err(AppError::CapacityExceeded);
        }

        let total_amount = event
            .price
            .checked_mul(i64::from(quantity))
            .ok_or_else(|| AppError::ValidationError("Quantity too large".to_string()))?;

        let intent = self
            .processor
            .create_intent(&CreateIntent {
                amount: total_amount,
                currency: self.currency.clone(),
                metadata: IntentMetadata {
                    event_id,
                    event_name: event.name.clone(),
                    quantity,
                    user_email: billing.email.clone(),
                },
            })
            .await?;

        let client_secret = intent.client_secret.clone().ok_or_else(|| {
            AppError::UpstreamError("Processor response missing client secret".to_string())
        })?;

        let payment = self
            .store
            .insert_pending_payment(NewPayment {
                stripe_payment_intent_id: intent.id.clone(),
                user_email: billing.email.clone(),
                full_name: billing.full_name.clone(),
                billing_address: BillingAddress::from(billing),
                amount: total_amount,
                currency: self.currency.clone(),
            })
            .await
            .map_err(|e| {
                // A live intent now exists with no local record. Nothing can
                // be rolled back on the processor side from here, so this
                // goes to the log for manual reconciliation.
                error!(
                    intent_id = %intent.id,
                    error = %e,
                    "Payment intent created but local payment insert failed; manual reconciliation required"
                );
                AppError::PersistenceError("Failed to create payment record".to_string())
            })?;

        info!(
            event_id = %event_id,
            payment_id = %payment.id,
            quantity,
            total = %format_minor_units(total_amount),
            "Created pending payment"
        );

        Ok(CreatePaymentOutcome {
            client_secret,
            payment_id: payment.id,
            event_name: event.name,
            total_amount,
        })
    }

    /// Verifies the intent reached `succeeded` at the processor, then
    /// commits the reservation. Calling this twice for the same payment is
    /// safe: the second call fails with `PaymentAlreadyConfirmed` and
    /// leaves no extra RSVP or attendee increment behind.
    pub async fn confirm_payment(
        &self,
        payment_intent_id: &str,
        payment_id: Uuid,
        event_id: Uuid,
        quantity: i32,
    ) -> Result<ConfirmPaymentOutcome, AppError> {
        validate_quantity(quantity)?;

        let intent = self.processor.retrieve_intent(payment_intent_id).await?;
        if intent.status != IntentStatus::Succeeded {
            warn!(
                intent_id = %payment_intent_id,
                status = ?intent.status,
                "Refusing confirmation, intent has not succeeded"
            );
            return Err(AppError::PaymentNotConfirmed);
        }

        let rsvp = self
            .store
            .confirm_reservation(payment_id, event_id, quantity)
            .await
            .map_err(|e| {
                if matches!(e, AppError::CapacityExceeded) {
                    // The charge went through but the seats are gone. The
                    // refund workflow is manual for now.
                    error!(
                        intent_id = %payment_intent_id,
                        payment_id = %payment_id,
                        "Seats exhausted after successful charge; manual refund required"
                    );
                }
                e
            })?;

        info!(
            rsvp_id = %rsvp.id,
            event_id = %event_id,
            quantity,
            "Payment confirmed and RSVP created"
        );

        Ok(ConfirmPaymentOutcome { rsvp_id: rsvp.id })
    }
}
