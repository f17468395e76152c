pub mod event;
pub mod payment;
pub mod rsvp;

pub use event::Event;
pub use payment::{BillingAddress, BillingInfo, NewPayment, Payment, PaymentStatus};
pub use rsvp::{Rsvp, RsvpStatus};
