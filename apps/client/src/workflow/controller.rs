use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::{ErrorBody, WorkflowError};
use crate::state::AppState;
use crate::workflow::{Workflow, WorkflowState};

/// Why a submission never reached `InFlight`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Busy,
    Invalid(String),
}

/// What one call to [`Controller::submit`] amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Succeeded(T),
    Failed(String),
    Rejected(Rejection),
    /// The call completed after a `reset()`; its result was dropped.
    Discarded,
}

impl<T> Outcome<T> {
    pub fn succeeded(&self) -> Option<&T> {
        match self {
            Outcome::Succeeded(value) => Some(value),
            _ => None,
        }
    }
}

struct Inner<T> {
    state: WorkflowState<T>,
    /// Armed from dispatch until the transport resolves, independent of `state`,
    /// so a `reset()` mid-flight cannot let a second request overlap the first.
    in_flight: bool,
    generation: u64,
}

/// Drives a single [`Workflow`] and owns its [`WorkflowState`].
pub struct Controller<W: Workflow> {
    workflow: W,
    app: AppState,
    inner: Mutex<Inner<W::Output>>,
}

impl<W: Workflow> Controller<W> {
    /// Binds a controller to one workflow. Starts `Idle`.
    pub fn configure(workflow: W, app: &AppState) -> Self {
        Self {
            workflow,
            app: app.clone(),
            inner: Mutex::new(Inner {
                state: WorkflowState::Idle,
                in_flight: false,
                generation: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<W::Output>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> WorkflowState<W::Output> {
        self.lock().state.clone()
    }

    pub fn result(&self) -> Option<W::Output> {
        self.lock().state.result().cloned()
    }

    /// True while a dispatched request is unresolved, even after a `reset()`.
    pub fn is_in_flight(&self) -> bool {
        self.lock().in_flight
    }

    /// Back to `Idle`. An in-flight request keeps running; its result is dropped on arrival.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.state = WorkflowState::Idle;
        inner.generation = inner.generation.wrapping_add(1);
        if inner.in_flight {
            debug!("{}: reset while in flight; pending result will be discarded", W::NAME);
        }
    }

    /// Runs the workflow once. The notifier hears about it exactly once.
    pub async fn submit(&self, input: &W::Input) -> Outcome<W::Output> {
        let generation = {
            let mut inner = self.lock();
            if inner.in_flight {
                None
            } else if let Err(err) =
                self.workflow.validate(input).map_err(WorkflowError::Validation)
            {
                Some(Err(err))
            } else {
                inner.in_flight = true;
                inner.state = WorkflowState::InFlight;
                Some(Ok(inner.generation))
            }
        };

        let generation = match generation {
            None => {
                let err = WorkflowError::Busy;
                debug!("{}: submission rejected, {err}", W::NAME);
                self.app.notifier.warning(&err.user_message(W::FAILURE_MESSAGE));
                return Outcome::Rejected(Rejection::Busy);
            }
            Some(Err(err)) => {
                debug!("{}: {err}", W::NAME);
                let message = err.user_message(W::FAILURE_MESSAGE);
                self.app.notifier.error(&message);
                return Outcome::Rejected(Rejection::Invalid(message));
            }
            Some(Ok(generation)) => generation,
        };

        let span = info_span!("submit", workflow = W::NAME, submission_id = %Uuid::new_v4());
        let result = self.execute(input).instrument(span).await;

        if let Err(err) = &result {
            warn!("{} failed: {err}", W::NAME);
        }

        let current = {
            let mut inner = self.lock();
            inner.in_flight = false;
            let current = inner.generation == generation;
            if current {
                inner.state = match &result {
                    Ok(output) => WorkflowState::Succeeded(output.clone()),
                    Err(err) => WorkflowState::Failed(err.user_message(W::FAILURE_MESSAGE)),
                };
            }
            current
        };

        let outcome = match result {
            Ok(output) => {
                self.app.notifier.success(W::SUCCESS_MESSAGE);
                Outcome::Succeeded(output)
            }
            Err(err) => {
                let message = err.user_message(W::FAILURE_MESSAGE);
                if err.is_warning() {
                    self.app.notifier.warning(&message);
                } else {
                    self.app.notifier.error(&message);
                }
                Outcome::Failed(message)
            }
        };

        if current {
            outcome
        } else {
            debug!("{}: dropping result of a reset submission", W::NAME);
            Outcome::Discarded
        }
    }

    async fn execute(&self, input: &W::Input) -> Result<W::Output, WorkflowError> {
        let url = self.app.config.endpoint_url(W::ENDPOINT);
        let payload = self.workflow.payload(input);

        info!("POST {url}");
        let response = self.app.transport.invoke(&url, payload).await?;

        if !response.is_success() {
            return Err(WorkflowError::Status {
                status: response.status,
                body: ErrorBody::parse(&response.body),
            });
        }

        let output: W::Output = serde_json::from_slice(&response.body)?;
        self.workflow.check(&output).map_err(WorkflowError::Rejected)?;

        debug!("{} succeeded", W::NAME);
        Ok(output)
    }
}
