use axum::Json;
use serde::Serialize;

pub mod payments;

pub use payments::{confirm_payment, create_payment};

#[derive(Serialize)]
pub struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Json<HealthPayload> {
    Json(HealthPayload {
        status: "ok",
        service: "supperclub-api",
    })
}
