//! Request-workflow controller: one user-triggered backend call, from input
//! validation to an observable `Succeeded` or `Failed` state.

pub mod controller;
pub mod state;

pub use controller::{Controller, Outcome, Rejection};
pub use state::WorkflowState;

use serde::de::DeserializeOwned;

use crate::transport::Payload;

/// Static description of one backend action.
///
/// Implementors are plain unit structs; the controller owns the lifecycle.
pub trait Workflow: Send + Sync {
    type Input: Send + Sync;
    type Output: DeserializeOwned + Clone + Send;

    /// Short identifier used in logs and spans.
    const NAME: &'static str;
    /// Path appended to the configured base URL.
    const ENDPOINT: &'static str;
    const SUCCESS_MESSAGE: &'static str;
    /// Shown when the service gives no usable `error` field.
    const FAILURE_MESSAGE: &'static str;

    /// Checked before any network call. `Err` carries the message for the notifier.
    fn validate(&self, _input: &Self::Input) -> Result<(), String> {
        Ok(())
    }

    fn payload(&self, input: &Self::Input) -> Payload;

    /// Rejects a decoded 2xx body that is still unusable.
    fn check(&self, _output: &Self::Output) -> Result<(), String> {
        Ok(())
    }
}

/// Validation helper shared by the workflow definitions.
pub(crate) fn require(value: &str, message: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}
