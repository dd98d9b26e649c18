// --- File: crates/careflow_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- CareFlow API Config ---
// Holds non-secret API config. The API key is loaded directly from the
// CAREFLOW_API_KEY env var and never appears in config files.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout in seconds. Falls back to the client default when unset.
    pub timeout_seconds: Option<u64>,
}

// --- Scenario Runner Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RunnerConfig {
    /// Date to query slots for when no CLI argument is given (YYYY-MM-DD).
    pub default_date: Option<String>,
    pub patient_ref: String,
    pub visit_type: String,
    pub cancel_reason: Option<String>,
    /// Optional provider filter passed to the slots query.
    pub provider: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub runner: RunnerConfig,
}
