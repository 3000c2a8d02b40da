use serde::Serialize;

/// Lifecycle of one controller. Only the controller moves between variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum WorkflowState<T> {
    #[default]
    Idle,
    InFlight,
    Succeeded(T),
    Failed(String),
}

impl<T> WorkflowState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, WorkflowState::Idle)
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, WorkflowState::InFlight)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            WorkflowState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WorkflowState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
