// --- File: crates/careflow_client/src/error.rs ---
use thiserror::Error;

/// Maximum number of bytes of a response body carried inside a
/// [`ApiClientError::Status`] error.
pub const BODY_SNIPPET_LIMIT: usize = 512;

/// Errors produced by the CareFlow API client.
#[derive(Error, Debug)]
pub enum ApiClientError {
    /// Transport failure: connection refused, timeout, DNS resolution.
    #[error("CareFlow API request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("CareFlow API returned an error: {body} (Status: {status})")]
    Status { status: u16, body: String },

    /// A 2xx body could not be decoded into the expected shape.
    #[error("Failed to parse CareFlow API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A structurally valid response lacked a field the caller depends on.
    #[error("CareFlow API response missing field: {0}")]
    MissingField(&'static str),

    /// Client configuration missing or incomplete (base URL, API key).
    #[error("CareFlow client configuration error: {0}")]
    Config(String),
}

/// Trims an error body down to [`BODY_SNIPPET_LIMIT`] bytes, respecting
/// char boundaries, so huge HTML error pages do not end up in logs verbatim.
pub(crate) fn body_snippet(body: &str) -> String {
    if body.len() <= BODY_SNIPPET_LIMIT {
        return body.to_string();
    }
    let mut end = BODY_SNIPPET_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}
