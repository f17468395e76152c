//! Scripted [`PaymentProcessor`] for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::services::processor::{CreateIntent, IntentStatus, PaymentIntent, PaymentProcessor};
use crate::utils::error::AppError;

/// A processor whose answers are fixed up front. Captures the last create
/// request so tests can assert on the amount and metadata sent.
pub struct StubProcessor {
    retrieve_status: IntentStatus,
    fail_create: bool,
    created: AtomicUsize,
    pub last_create: Mutex<Option<CreateIntent>>,
}

impl StubProcessor {
    pub fn succeeding() -> Self {
        Self::with_status(IntentStatus::Succeeded)
    }

    pub fn with_status(retrieve_status: IntentStatus) -> Self {
        Self {
            retrieve_status,
            fail_create: false,
            created: AtomicUsize::new(0),
            last_create: Mutex::new(None),
        }
    }

    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::succeeding()
        }
    }

    pub fn create_calls(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentProcessor for StubProcessor {
    async fn create_intent(&self, request: &CreateIntent) -> Result<PaymentIntent, AppError> {
        if self.fail_create {
            return Err(AppError::UpstreamError("processor unavailable".to_string()));
        }

        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_create.lock().unwrap() = Some(request.clone());

        Ok(PaymentIntent {
            id: format!("pi_stub_{n}"),
            client_secret: Some(format!("pi_stub_{n}_secret")),
            status: IntentStatus::RequiresPaymentMethod,
        })
    }

    async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, AppError> {
        Ok(PaymentIntent {
            id: intent_id.to_string(),
            client_secret: None,
            status: self.retrieve_status,
        })
    }
}
