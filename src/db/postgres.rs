use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::ReservationStore;
use crate::models::{Event, NewPayment, Payment, PaymentStatus, Rsvp, RsvpStatus};
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStore for PgStore {
    async fn find_event(&self, event_id: Uuid) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    async fn insert_pending_payment(&self, payment: NewPayment) -> Result<Payment, AppError> {
        let row = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (stripe_payment_intent_id, user_email, full_name, billing_address, amount, currency, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&payment.stripe_payment_intent_id)
        .bind(&payment.user_email)
        .bind(&payment.full_name)
        .bind(Json(&payment.billing_address))
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(PaymentStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn confirm_reservation(
        &self,
        payment_id: Uuid,
        event_id: Uuid,
        quantity: i32,
    ) -> Result<Rsvp, AppError> {
        let mut tx = self.pool.begin().await?;

        // Guarded status transition doubles as the idempotence check:
        // a payment leaves `pending` exactly once.
        let payment = sqlx::query_as::<_, Payment>(
            "UPDATE payments SET status = 'succeeded', updated_at = now() \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(payment_id)
        .fetch_optional(&mut *tx)
        .await?;

        let payment = match payment {
            Some(p) => p,
            None => {
                let existing =
                    sqlx::query_scalar::<_, String>("SELECT status FROM payments WHERE id = $1")
                        .bind(payment_id)
                        .fetch_optional(&mut *tx)
                        .await?;

                return Err(match existing.as_deref() {
                    None => AppError::NotFound("Payment not found".to_string()),
                    Some("succeeded") => AppError::PaymentAlreadyConfirmed,
                    Some(other) => AppError::PersistenceError(format!(
                        "payment {payment_id} is in unexpected state '{other}'"
                    )),
                });
            }
        };

        // Conditional increment is the binding capacity check; the one in
        // the intent service is advisory only. Zero affected rows means the
        // seats are gone, and the whole transaction rolls back.
        let updated = sqlx::query(
            "UPDATE events SET current_attendees = current_attendees + $2, updated_at = now() \
             WHERE id = $1 AND current_attendees + $2 <= max_attendees",
        )
        .bind(event_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM events WHERE id = $1")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?;

            return Err(if exists.is_some() {
                AppError::CapacityExceeded
            } else {
                AppError::NotFound("Event not found".to_string())
            });
        }

        let rsvp = sqlx::query_as::<_, Rsvp>(
            r#"
            INSERT INTO rsvps (event_id, payment_id, user_email, full_name, quantity, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(payment_id)
        .bind(&payment.user_email)
        .bind(&payment.full_name)
        .bind(quantity)
        .bind(RsvpStatus::Confirmed.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            // The unique payment_id link means a concurrent confirmation
            // already won; surface that as the idempotence error.
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::PaymentAlreadyConfirmed
            }
            _ => AppError::RsvpCreationError(e.to_string()),
        })?;

        tx.commit().await?;

        Ok(rsvp)
    }
}
