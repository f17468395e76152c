//! Stripe payment-intent client.
//!
//! Talks to the two endpoints of the payment-intents API this service
//! needs: create and retrieve. Requests are form-encoded with bearer auth
//! per the Stripe wire contract. Transport failures (timeout/connect) are
//! retried once; business failures are never retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::services::processor::{CreateIntent, PaymentIntent, PaymentProcessor};
use crate::utils::error::AppError;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct StripeClient {
    http: Client,
    api_base: String,
    secret_key: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: Option<String>,
}

impl StripeClient {
    pub fn new(api_base: impl Into<String>, secret_key: impl Into<String>) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("supperclub-server/0.1")
            .build()
            .map_err(|e| AppError::UpstreamError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base: api_base.into(),
            secret_key: secret_key.into(),
        })
    }

    /// Sends the request, retrying exactly once on a transport-level
    /// failure. Anything the server answered, including errors, goes
    /// straight to response handling.
    async fn send_with_retry(&self, request: RequestBuilder) -> Result<reqwest::Response, AppError> {
        let retry = request.try_clone();

        match request.send().await {
            Ok(response) => Ok(response),
            Err(e) if e.is_timeout() || e.is_connect() => match retry {
                Some(second_attempt) => {
                    warn!(error = %e, "Stripe request failed in transport, retrying once");
                    second_attempt
                        .send()
                        .await
                        .map_err(|e| AppError::UpstreamError(e.to_string()))
                }
                None => Err(AppError::UpstreamError(e.to_string())),
            },
            Err(e) => Err(AppError::UpstreamError(e.to_string())),
        }
    }

    async fn parse_intent(response: reqwest::Response) -> Result<PaymentIntent, AppError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<PaymentIntent>()
                .await
                .map_err(|e| AppError::UpstreamError(format!("invalid Stripe response: {e}")));
        }

        let message = response
            .json::<StripeErrorEnvelope>()
            .await
            .ok()
            .and_then(|envelope| envelope.error.message)
            .unwrap_or_else(|| format!("Stripe returned HTTP {status}"));

        Err(AppError::UpstreamError(message))
    }
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    async fn create_intent(&self, request: &CreateIntent) -> Result<PaymentIntent, AppError> {
        let params = [
            ("amount", request.amount.to_string()),
            ("currency", request.currency.clone()),
            ("metadata[event_id]", request.metadata.event_id.to_string()),
            ("metadata[event_name]", request.metadata.event_name.clone()),
            ("metadata[quantity]", request.metadata.quantity.to_string()),
            ("metadata[user_email]", request.metadata.user_email.clone()),
        ];

        let req = self
            .http
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&params);

        let response = self.send_with_retry(req).await?;
        let intent = Self::parse_intent(response).await?;

        debug!(intent_id = %intent.id, amount = request.amount, "Created Stripe payment intent");
        Ok(intent)
    }

    async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, AppError> {
        let req = self
            .http
            .get(format!("{}/v1/payment_intents/{intent_id}", self.api_base))
            .bearer_auth(&self.secret_key);

        let response = self.send_with_retry(req).await?;
        Self::parse_intent(response).await
    }
}
