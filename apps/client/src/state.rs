use std::sync::Arc;

use crate::config::Config;
use crate::notify::Notifier;
use crate::transport::{HttpTransport, Transport, TransportError};

/// Shared wiring handed to every controller a page creates.
/// Cloning is cheap; controllers never share workflow state through it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub transport: Arc<dyn Transport>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: Config, transport: Arc<dyn Transport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            notifier,
        }
    }

    /// Production wiring: `reqwest` transport built from `config`.
    pub fn with_http(config: Config, notifier: Arc<dyn Notifier>) -> Result<Self, TransportError> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::new(config, transport, notifier))
    }
}
