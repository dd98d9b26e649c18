// --- File: crates/careflow_client/src/models.rs ---

use serde::{Deserialize, Serialize};

use crate::error::ApiClientError;

// --- Data Structures ---

/// A bookable time interval offered by a provider.
///
/// Slots are ephemeral: they only exist inside a `/slots` response and are
/// consumed by booking. Timestamps are the server's naive ISO strings and
/// are threaded through verbatim rather than reinterpreted locally.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Slot {
    pub start: String,
    pub end: String,
    pub provider: String,
}

/// Response envelope of `GET /slots`.
#[derive(Deserialize, Debug)]
pub struct SlotsResponse {
    #[serde(default)]
    pub slots: Vec<Slot>,
}

/// Response of `GET /health`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HealthResponse {
    pub ok: bool,
    #[serde(default)]
    pub api_key_present: bool,
}

/// A confirmed reservation as echoed back by the server.
///
/// The booking id, once issued, is stable across reschedules; cancel is
/// terminal and no further operations on that id are valid.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Booking {
    pub patient_ref: String,
    pub start: String,
    pub end: String,
    pub provider: String,
    pub visit_type: String,
}

/// Body of `POST /book`.
#[derive(Serialize, Debug, Clone)]
pub struct BookRequest {
    pub patient_ref: String,
    pub start: String,
    pub end: String,
    pub provider: String,
    pub visit_type: String,
}

impl BookRequest {
    /// Builds a booking request for a listed slot.
    pub fn for_slot(slot: &Slot, patient_ref: &str, visit_type: &str) -> Self {
        Self {
            patient_ref: patient_ref.to_string(),
            start: slot.start.clone(),
            end: slot.end.clone(),
            provider: slot.provider.clone(),
            visit_type: visit_type.to_string(),
        }
    }
}

/// Response of `POST /book`.
///
/// `booking_id` is optional on purpose: the server may have handed the slot
/// to a concurrent caller, in which case the confirmation comes back without
/// an id. Callers decide how to treat that.
#[derive(Deserialize, Debug, Clone)]
pub struct BookResponse {
    pub booking_id: Option<String>,
    pub status: Option<String>,
    pub booking: Option<Booking>,
}

impl BookResponse {
    /// Returns the issued booking id, or [`ApiClientError::MissingField`]
    /// when the server confirmed without one.
    pub fn require_booking_id(&self) -> Result<&str, ApiClientError> {
        self.booking_id
            .as_deref()
            .ok_or(ApiClientError::MissingField("booking_id"))
    }
}

/// Body of `POST /reschedule`.
#[derive(Serialize, Debug, Clone)]
pub struct RescheduleRequest {
    pub booking_id: String,
    pub new_start: String,
    pub new_end: String,
}

impl RescheduleRequest {
    /// Moves an existing booking onto a different listed slot.
    pub fn to_slot(booking_id: &str, slot: &Slot) -> Self {
        Self {
            booking_id: booking_id.to_string(),
            new_start: slot.start.clone(),
            new_end: slot.end.clone(),
        }
    }
}

/// Response of `POST /reschedule`.
#[derive(Deserialize, Debug, Clone)]
pub struct RescheduleResponse {
    pub booking_id: String,
    pub status: Option<String>,
    pub booking: Option<Booking>,
}

/// Body of `POST /cancel`.
#[derive(Serialize, Debug, Clone)]
pub struct CancelRequest {
    pub booking_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Response of `POST /cancel`.
#[derive(Deserialize, Debug, Clone)]
pub struct CancelResponse {
    pub booking_id: String,
    pub status: Option<String>,
    pub reason: Option<String>,
}

/// Body of `POST /message/send`.
#[derive(Serialize, Debug, Clone)]
pub struct SendMessageRequest {
    /// Delivery channel, "sms" or "email".
    pub channel: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

/// Response of `POST /message/send`.
#[derive(Deserialize, Debug, Clone)]
pub struct SendMessageResponse {
    pub status: String,
    pub message_id: String,
}

/// Body of `POST /insurance/verify`.
#[derive(Serialize, Debug, Clone)]
pub struct InsuranceVerifyRequest {
    pub payer: String,
    pub cpt_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_type: Option<String>,
}

/// Response of `POST /insurance/verify`.
#[derive(Deserialize, Debug, Clone)]
pub struct InsuranceVerifyResponse {
    pub covered: bool,
    pub copay_estimate: f64,
    pub preauth_required: bool,
    #[serde(default)]
    pub steps: Vec<String>,
}
