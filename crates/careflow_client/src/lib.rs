// --- File: crates/careflow_client/src/lib.rs ---

pub mod client;
pub mod error;
pub mod models;

// Re-export the pieces callers actually wire together
pub use client::CareFlowClient;
pub use error::ApiClientError;
pub use models::{
    BookRequest, BookResponse, Booking, CancelRequest, CancelResponse, HealthResponse,
    InsuranceVerifyRequest, InsuranceVerifyResponse, RescheduleRequest, RescheduleResponse,
    SendMessageRequest, SendMessageResponse, Slot, SlotsResponse,
};
