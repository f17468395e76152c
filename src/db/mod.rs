//! Persistence layer for the reservation workflow.
//!
//! The services depend on [`ReservationStore`] rather than a concrete pool
//! so the confirmation semantics can be tested without a live database.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Event, NewPayment, Payment, Rsvp};
use crate::utils::error::AppError;

pub use postgres::PgStore;

#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn find_event(&self, event_id: Uuid) -> Result<Option<Event>, AppError>;

    /// Persists a `pending` payment row after the processor intent exists.
    async fn insert_pending_payment(&self, payment: NewPayment) -> Result<Payment, AppError>;

    /// Commits a verified payment as a reservation: marks the payment
    /// `succeeded` (only from `pending`), takes `quantity` seats via a
    /// conditional increment bounded by the event's capacity, and inserts
    /// the `confirmed` RSVP. All three steps commit or roll back together,
    /// so a `succeeded` payment without an RSVP cannot be observed.
    async fn confirm_reservation(
        &self,
        payment_id: Uuid,
        event_id: Uuid,
        quantity: i32,
    ) -> Result<Rsvp, AppError>;
}
