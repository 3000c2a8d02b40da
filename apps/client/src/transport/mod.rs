//! Transport — the single boundary between controllers and the backend service.
//!
//! Controllers only ever see the `Transport` trait. `HttpTransport` is the
//! production implementation; tests swap in scripted transports.
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not read upload '{path}': {source}")]
    Upload {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Body of a `POST` to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: FileBlob },
}

/// An opaque file handed to the backend as form data.
#[derive(Debug, Clone, PartialEq)]
pub struct FileBlob {
    pub file_name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl FileBlob {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            mime,
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| TransportError::Upload {
                path: path.display().to_string(),
                source,
            })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, bytes))
    }

    /// Lowercased extension after the last `.`, if any.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// Status and undecoded body of a completed exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One `POST` exchange with the backend. A returned `Ok` may still carry a
/// non-2xx status; only failures to complete the exchange are `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn invoke(&self, url: &str, payload: Payload) -> Result<RawResponse, TransportError>;
}

/// `reqwest`-backed transport shared by every controller of a process.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .cookie_store(config.include_credentials)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn invoke(&self, url: &str, payload: Payload) -> Result<RawResponse, TransportError> {
        let request = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json");

        let request = match payload {
            Payload::Json(body) => request.json(&body),
            Payload::Multipart(parts) => request.multipart(build_form(parts)?),
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!("POST {url} -> {status} ({} bytes)", body.len());

        Ok(RawResponse { status, body })
    }
}

fn build_form(parts: Vec<FormPart>) -> Result<multipart::Form, TransportError> {
    let mut form = multipart::Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File { name, file } => {
                let part = multipart::Part::bytes(file.bytes.to_vec())
                    .file_name(file.file_name)
                    .mime_str(&file.mime)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}
