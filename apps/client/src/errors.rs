use serde::Deserialize;
use thiserror::Error;

use crate::transport::TransportError;

/// Everything that can stop a submission from reaching `Succeeded`.
///
/// None of these escape a controller: they are folded into a `Failed` state
/// (or a rejected submission) and handed to the notifier.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A request is already in flight")]
    Busy,

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Request failed with status {status}")]
    Status { status: u16, body: ErrorBody },

    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service answered 2xx but the payload is unusable, e.g. an empty question list.
    #[error("Rejected result: {0}")]
    Rejected(String),
}

/// Error envelope the backend sends with non-2xx responses. Both fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ErrorBody {
    /// Best-effort parse. Non-JSON or non-object bodies yield an empty envelope.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Backend integration is missing rather than broken.
    pub fn is_not_configured(&self) -> bool {
        self.status.as_deref() == Some("not_configured")
    }
}

impl WorkflowError {
    /// The string shown to the user. Falls back to `fallback` unless the
    /// service supplied a non-empty `error` field or the check produced its own reason.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            WorkflowError::Validation(msg) | WorkflowError::Rejected(msg) => msg.clone(),
            WorkflowError::Busy => "Please wait for the current request to finish".to_string(),
            WorkflowError::Status { body, .. } => body
                .error
                .as_deref()
                .map(str::trim)
                .filter(|msg| !msg.is_empty())
                .unwrap_or(fallback)
                .to_string(),
            WorkflowError::Transport(_) | WorkflowError::Decode(_) => fallback.to_string(),
        }
    }

    /// Whether the notifier should treat this as a warning instead of an error.
    pub fn is_warning(&self) -> bool {
        match self {
            WorkflowError::Busy => true,
            WorkflowError::Status { body, .. } => body.is_not_configured(),
            _ => false,
        }
    }
}
