//! In-memory doubles for controller and page tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use tokio::sync::Notify;

use crate::config::Config;
use crate::notify::NoticeQueue;
use crate::state::AppState;
use crate::transport::{Payload, RawResponse, Transport, TransportError};

enum Reply {
    Response(RawResponse),
    ConnectionError(String),
}

/// Replays queued replies in order and records every request it sees.
/// A gated transport parks each call until the gate is notified.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<(String, Payload)>>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn reply_json(self, status: u16, body: Value) -> Self {
        self.push(Reply::Response(RawResponse {
            status,
            body: Bytes::from(body.to_string()),
        }))
    }

    pub fn reply_raw(self, status: u16, body: &str) -> Self {
        self.push(Reply::Response(RawResponse {
            status,
            body: Bytes::from(body.to_string()),
        }))
    }

    pub fn reply_connection_error(self, message: &str) -> Self {
        self.push(Reply::ConnectionError(message.to_string()))
    }

    fn push(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<(String, Payload)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Request URLs in the order they were issued.
    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|(url, _)| url).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn invoke(&self, url: &str, payload: Payload) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push((url.to_string(), payload));

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::ConnectionError(message)) => Err(TransportError::Connection(message)),
            None => Err(TransportError::Connection("no scripted reply".to_string())),
        }
    }
}

/// Wires a scripted transport and a notice queue against `http://backend.test`.
pub fn app_with(transport: ScriptedTransport) -> (AppState, Arc<NoticeQueue>) {
    let notices = Arc::new(NoticeQueue::new());
    let config = Config::default().with_api_url("http://backend.test");
    let app = AppState::new(config, Arc::new(transport), notices.clone());
    (app, notices)
}
