use std::sync::Arc;

use crate::services::PaymentService;

/// Shared handler state. Everything inside is behind an `Arc`; each request
/// works with the same service instance and no other cross-request memory.
#[derive(Clone)]
pub struct AppState {
    pub payments: Arc<PaymentService>,
}

impl AppState {
    pub fn new(payments: PaymentService) -> Self {
        Self {
            payments: Arc::new(payments),
        }
    }
}
