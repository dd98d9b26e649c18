// --- File: crates/careflow_client/src/client.rs ---
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{body_snippet, ApiClientError};
use crate::models::{
    BookRequest, BookResponse, CancelRequest, CancelResponse, HealthResponse,
    InsuranceVerifyRequest, InsuranceVerifyResponse, RescheduleRequest, RescheduleResponse,
    SendMessageRequest, SendMessageResponse, Slot, SlotsResponse,
};

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the API key on every request.
const API_KEY_HEADER: &str = "x-api-key";

/// Typed client for the CareFlow scheduling API.
///
/// Every request carries the `x-api-key` header; POST bodies are JSON.
/// Each call is a single attempt: no retries, no backoff.
#[derive(Clone)]
pub struct CareFlowClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl CareFlowClient {
    /// Creates a client against `base_url` authenticating with `api_key`.
    ///
    /// `timeout_seconds` falls back to 30 s when `None`.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, ApiClientError> {
        if base_url.is_empty() {
            return Err(ApiClientError::Config("base URL is empty".to_string()));
        }
        if api_key.is_empty() {
            return Err(ApiClientError::Config(
                "API key is empty (set CAREFLOW_API_KEY)".to_string(),
            ));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(
                timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// GET `/health`.
    pub async fn health(&self) -> Result<HealthResponse, ApiClientError> {
        self.request(Method::GET, "/health", &[], None::<&()>).await
    }

    /// GET `/slots`, optionally filtered by date (YYYY-MM-DD) and provider.
    ///
    /// Slots come back in server order and are never sorted locally.
    pub async fn list_slots(
        &self,
        date: Option<&str>,
        provider: Option<&str>,
    ) -> Result<Vec<Slot>, ApiClientError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(date) = date {
            query.push(("date", date));
        }
        if let Some(provider) = provider {
            query.push(("provider", provider));
        }
        let response: SlotsResponse = self
            .request(Method::GET, "/slots", &query, None::<&()>)
            .await?;
        Ok(response.slots)
    }

    /// POST `/book`.
    ///
    /// A response without `booking_id` is returned as-is; deciding whether
    /// that is a lost race or a hard failure is up to the caller.
    pub async fn book(&self, request: &BookRequest) -> Result<BookResponse, ApiClientError> {
        self.request(Method::POST, "/book", &[], Some(request)).await
    }

    /// POST `/reschedule`.
    pub async fn reschedule(
        &self,
        request: &RescheduleRequest,
    ) -> Result<RescheduleResponse, ApiClientError> {
        self.request(Method::POST, "/reschedule", &[], Some(request))
            .await
    }

    /// POST `/cancel`. Cancel is terminal for the booking id.
    pub async fn cancel(
        &self,
        booking_id: &str,
        reason: Option<&str>,
    ) -> Result<CancelResponse, ApiClientError> {
        let request = CancelRequest {
            booking_id: booking_id.to_string(),
            reason: reason.map(str::to_string),
        };
        self.request(Method::POST, "/cancel", &[], Some(&request))
            .await
    }

    /// POST `/message/send`.
    pub async fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> Result<SendMessageResponse, ApiClientError> {
        self.request(Method::POST, "/message/send", &[], Some(request))
            .await
    }

    /// POST `/insurance/verify`.
    pub async fn verify_insurance(
        &self,
        request: &InsuranceVerifyRequest,
    ) -> Result<InsuranceVerifyResponse, ApiClientError> {
        self.request(Method::POST, "/insurance/verify", &[], Some(request))
            .await
    }

    /// Issues one authenticated request and decodes the JSON response.
    ///
    /// Failure mapping: transport errors become [`ApiClientError::Network`],
    /// non-2xx statuses become [`ApiClientError::Status`] with a body
    /// snippet, and undecodable 2xx bodies become [`ApiClientError::Decode`].
    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("[CareFlow Client] {} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(API_KEY_HEADER, &self.api_key);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            let message = extract_error_detail(&body_text);
            info!(
                "[CareFlow Client] {} {} failed with HTTP status: {}. Message: {}",
                method, url, status, message
            );
            return Err(ApiClientError::Status {
                status: status.as_u16(),
                body: message,
            });
        }

        let decoded: T = serde_json::from_str(&body_text)?;
        Ok(decoded)
    }
}

/// Pulls the `detail` message out of a FastAPI-style error body, falling
/// back to a snippet of the raw body when it is not JSON in that shape.
fn extract_error_detail(body_text: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body_text) {
        Ok(json_body) => json_body
            .get("detail")
            .and_then(|d| d.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| body_snippet(body_text)),
        Err(_) => body_snippet(body_text),
    }
}
