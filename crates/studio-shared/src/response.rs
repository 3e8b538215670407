//! Error bodies returned by the data API.

use serde::{Deserialize, Serialize};

/// Error envelope: `{ "error": { ... } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Details of a rejected request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error type, e.g. `mutationError`.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,

    /// Human-readable explanation.
    #[serde(default)]
    pub description: Option<String>,

    /// Per-mutation failures, when the platform reports them.
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

impl ApiErrorResponse {
    /// Best human-readable message, falling back to the error type.
    pub fn message(&self) -> String {
        self.error
            .description
            .clone()
            .or_else(|| self.error.error_type.clone())
            .unwrap_or_else(|| "unknown error".to_string())
    }
}
