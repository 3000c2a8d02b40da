pub mod config;
pub mod errors;
pub mod notify;
pub mod pages;
pub mod state;
pub mod transport;
pub mod workflow;
pub mod workflows;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use notify::{Notice, NoticeLevel, NoticeQueue, Notifier, TracingNotifier};
pub use state::AppState;
pub use workflow::{Controller, Outcome, Rejection, Workflow, WorkflowState};
