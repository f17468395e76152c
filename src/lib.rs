//! Backend for a social dining application.
//!
//! The interesting part is the RSVP payment workflow: `create-payment`
//! opens a Stripe payment intent against available seat inventory, and
//! `confirm-payment` re-verifies the charge with Stripe before atomically
//! recording the RSVP and taking the seats. Seats are never oversold; the
//! binding capacity check is a conditional increment at confirmation time.

pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use utils::error::AppError;
