//! In-memory [`ReservationStore`] used by unit tests. Mirrors the Postgres
//! store's semantics: the pending-only status transition, the capacity-
//! bounded increment, and the unique payment→RSVP link, all applied
//! atomically under one lock.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use crate::db::ReservationStore;
use crate::models::{Event, NewPayment, Payment, PaymentStatus, Rsvp, RsvpStatus};
use crate::utils::error::AppError;

#[derive(Default)]
struct Inner {
    events: HashMap<Uuid, Event>,
    payments: HashMap<Uuid, Payment>,
    rsvps: Vec<Rsvp>,
    fail_payment_insert: bool,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_event(&self, event: Event) {
        let mut inner = self.inner.lock().unwrap();
        inner.events.insert(event.id, event);
    }

    /// Makes the next (and every subsequent) payment insert fail, to
    /// exercise the intent-created-but-not-recorded path.
    pub fn fail_payment_inserts(&self) {
        self.inner.lock().unwrap().fail_payment_insert = true;
    }

    pub fn payment(&self, id: Uuid) -> Option<Payment> {
        self.inner.lock().unwrap().payments.get(&id).cloned()
    }

    pub fn payment_count(&self) -> usize {
        self.inner.lock().unwrap().payments.len()
    }

    pub fn event(&self, id: Uuid) -> Option<Event> {
        self.inner.lock().unwrap().events.get(&id).cloned()
    }

    pub fn rsvps_for(&self, event_id: Uuid) -> Vec<Rsvp> {
        self.inner
            .lock()
            .unwrap()
            .rsvps
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect()
    }
}

/// Builds an event row for tests with the capacity and price under test.
pub fn sample_event(price: i64, max_attendees: i32, current_attendees: i32) -> Event {
    let now = Utc::now();
    Event {
        id: Uuid::new_v4(),
        name: "Pasta Night".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
        time: "19:00".to_string(),
        location: "Mission District".to_string(),
        description: Some("Handmade pasta with strangers".to_string()),
        host: "Carla".to_string(),
        price,
        max_attendees,
        current_attendees,
        tags: vec!["italian".to_string()],
        image_url: None,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn find_event(&self, event_id: Uuid) -> Result<Option<Event>, AppError> {
        Ok(self.inner.lock().unwrap().events.get(&event_id).cloned())
    }

    async fn insert_pending_payment(&self, payment: NewPayment) -> Result<Payment, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_payment_insert {
            return Err(AppError::DatabaseError(sqlx::Error::PoolClosed));
        }

        let now = Utc::now();
        let row = Payment {
            id: Uuid::new_v4(),
            stripe_payment_intent_id: payment.stripe_payment_intent_id,
            stripe_session_id: None,
            user_email: payment.user_email,
            full_name: payment.full_name,
            billing_address: Json(payment.billing_address),
            amount: payment.amount,
            currency: payment.currency,
            status: PaymentStatus::Pending.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.payments.insert(row.id, row.clone());
        Ok(row)
    }

    async fn confirm_reservation(
        &self,
        payment_id: Uuid,
        event_id: Uuid,
        quantity: i32,
    ) -> Result<Rsvp, AppError> {
        let mut inner = self.inner.lock().unwrap();

        // Check every precondition before mutating anything, mirroring the
        // all-or-nothing transaction in the Postgres store.
        let payment = match inner.payments.get(&payment_id) {
            None => return Err(AppError::NotFound("Payment not found".to_string())),
            Some(p) if p.status == PaymentStatus::Succeeded.as_str() => {
                return Err(AppError::PaymentAlreadyConfirmed)
            }
            Some(p) if p.status != PaymentStatus::Pending.as_str() => {
                return Err(AppError::PersistenceError(format!(
                    "payment {payment_id} is in unexpected state '{}'",
                    p.status
                )))
            }
            Some(p) => p.clone(),
        };

        if inner.rsvps.iter().any(|r| r.payment_id == payment_id) {
            return Err(AppError::PaymentAlreadyConfirmed);
        }

        let event = inner
            .events
            .get(&event_id)
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        if event.current_attendees + quantity > event.max_attendees {
            return Err(AppError::CapacityExceeded);
        }

        if let Some(p) = inner.payments.get_mut(&payment_id) {
            p.status = PaymentStatus::Succeeded.as_str().to_string();
            p.updated_at = Utc::now();
        }
        if let Some(e) = inner.events.get_mut(&event_id) {
            e.current_attendees += quantity;
            e.updated_at = Utc::now();
        }

        let now = Utc::now();
        let rsvp = Rsvp {
            id: Uuid::new_v4(),
            event_id,
            payment_id,
            user_email: payment.user_email,
            full_name: payment.full_name,
            quantity,
            status: RsvpStatus::Confirmed.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.rsvps.push(rsvp.clone());
        Ok(rsvp)
    }
}
