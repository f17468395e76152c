pub mod payments;
pub mod processor;
pub mod stripe;

#[cfg(test)]
pub mod stub;

pub use payments::PaymentService;
pub use processor::{IntentStatus, PaymentIntent, PaymentProcessor};
pub use stripe::StripeClient;
