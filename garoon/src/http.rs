// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport: verb-per-operation trait, the reqwest-backed client
//! with error normalization, and session-token resolution.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::Method;
use serde_json::{Map, Value};

use crate::config::GaroonConfig;
use crate::error::{Error, ErrorEnvelope};
use crate::params::Params;
use crate::request::{Payload, RequestBody, RequestConfig, RequestConfigBuilder, ResponseKind};

/// Callback notified of every HTTP or transport failure, before the
/// failing call returns.
///
/// Intended for cross-cutting logging and metrics; it cannot recover the
/// call and is never consulted for the outcome.
pub type ErrorHandler = Arc<dyn Fn(&Error) + Send + Sync>;

/// One part of a multipart form payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// A plain text field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// A file field.
    File {
        /// Field name.
        name: String,
        /// File name reported to the server.
        filename: String,
        /// Raw file content.
        content: Vec<u8>,
    },
}

/// An ordered multipart form payload.
///
/// Parts are encoded in insertion order and file bytes pass through
/// unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    parts: Vec<FormPart>,
}

impl FormData {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Appends a file field from raw bytes.
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            filename: filename.into(),
            content,
        });
        self
    }

    /// Appends a file field from base64-encoded content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if `content` is not valid base64.
    pub fn file_base64(
        self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content: &str,
    ) -> Result<Self, Error> {
        let bytes = STANDARD
            .decode(content)
            .map_err(|e| Error::Encoding(format!("invalid base64 file content: {e}")))?;
        Ok(self.file(name, filename, bytes))
    }

    /// Returns the parts in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Returns `true` if the form has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn into_multipart(self) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    filename,
                    content,
                } => form.part(
                    name,
                    reqwest::multipart::Part::bytes(content).file_name(filename),
                ),
            };
        }
        form
    }
}

/// HTTP transport for Garoon operations, one operation per verb.
///
/// Resource clients are generic over this trait so tests can substitute a
/// recording transport.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a GET request; `params` become the query string.
    async fn get(&self, path: &str, params: &Params) -> Result<Value, Error>;

    /// Sends a GET request and returns the raw response bytes.
    async fn get_binary(&self, path: &str, params: &Params) -> Result<Vec<u8>, Error>;

    /// Sends a POST request with a JSON body.
    async fn post(&self, path: &str, body: Value) -> Result<Value, Error>;

    /// Sends a POST request with a multipart form body.
    async fn post_form(&self, path: &str, form: FormData) -> Result<Value, Error>;

    /// Sends a PUT request with a JSON body.
    async fn put(&self, path: &str, body: Value) -> Result<Value, Error>;

    /// Sends a PATCH request with a JSON body.
    async fn patch(&self, path: &str, body: Value) -> Result<Value, Error>;

    /// Sends a DELETE request; `params` become the query string.
    async fn delete(&self, path: &str, params: &Params) -> Result<Value, Error>;
}

/// The reqwest-backed [`HttpClient`].
///
/// Each call builds its own [`RequestConfig`], so concurrent calls on one
/// client never share mutable state; the configuration and credentials are
/// read-only for the client's lifetime. Failures are never retried and
/// never downgraded: every one reaches the caller, after the optional
/// error handler has been notified.
pub struct GaroonHttpClient {
    http: reqwest::Client,
    builder: RequestConfigBuilder,
    error_handler: Option<ErrorHandler>,
}

impl std::fmt::Debug for GaroonHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaroonHttpClient")
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

impl GaroonHttpClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: GaroonConfig) -> Result<Self, Error> {
        let http = build_reqwest_client(&config)?;
        let builder = RequestConfigBuilder::new(config, http.clone())?;
        Ok(Self {
            http,
            builder,
            error_handler: None,
        })
    }

    /// Registers a handler notified of every HTTP/transport failure.
    #[must_use]
    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.error_handler = Some(handler);
        self
    }

    async fn request_json(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<Value, Error> {
        let result = self.try_request_json(method, path, payload).await;
        result.map_err(|e| self.notify(e))
    }

    async fn try_request_json(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<Value, Error> {
        let config = self.builder.build(method, path, payload).await?;
        let resp = self.execute(config).await?;
        let text = resp.text().await.map_err(|e| Error::Transport(e.to_string()))?;
        if text.is_empty() {
            // 204-style answers decode as an empty object.
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_str(&text).map_err(|e| Error::InvalidResponse(e.to_string()))
    }

    async fn request_binary(&self, path: &str, params: &Params) -> Result<Vec<u8>, Error> {
        let result = self.try_request_binary(path, params).await;
        result.map_err(|e| self.notify(e))
    }

    async fn try_request_binary(&self, path: &str, params: &Params) -> Result<Vec<u8>, Error> {
        let config = self
            .builder
            .build_binary(Method::GET, path, Payload::Params(params.clone()))
            .await?;
        debug_assert_eq!(config.response_kind, ResponseKind::Binary);
        let resp = self.execute(config).await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Executes a built request and normalizes failures.
    async fn execute(&self, config: RequestConfig) -> Result<reqwest::Response, Error> {
        tracing::debug!(method = %config.method, url = %config.url, "sending request");

        let mut req = self.http.request(config.method, &config.url);
        for (name, value) in &config.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        match config.body {
            Some(RequestBody::Json(value)) => {
                req = req.body(serde_json::to_vec(&value)?);
            }
            Some(RequestBody::Form(form)) => {
                req = req.multipart(form.into_multipart());
            }
            None => {}
        }

        let resp = req.send().await.map_err(|e| Error::Transport(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let headers = resp
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let data = match resp.text().await {
            Ok(text) if text.is_empty() => None,
            Ok(text) => Some(serde_json::from_str(&text).unwrap_or(Value::String(text))),
            Err(_) => None,
        };

        tracing::debug!(status = %status, "request failed");
        Err(Error::Http(ErrorEnvelope {
            data,
            status: status.as_u16(),
            status_text,
            headers,
        }))
    }

    /// Notifies the registered handler of a wire-level failure, then
    /// returns the error unchanged. Called exactly once per failing call.
    fn notify(&self, error: Error) -> Error {
        if matches!(error, Error::Http(_) | Error::Transport(_)) {
            if let Some(handler) = &self.error_handler {
                handler(&error);
            }
        }
        error
    }
}

#[async_trait]
impl HttpClient for GaroonHttpClient {
    async fn get(&self, path: &str, params: &Params) -> Result<Value, Error> {
        self.request_json(Method::GET, path, Payload::Params(params.clone()))
            .await
    }

    async fn get_binary(&self, path: &str, params: &Params) -> Result<Vec<u8>, Error> {
        self.request_binary(path, params).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, Error> {
        self.request_json(Method::POST, path, Payload::Json(body)).await
    }

    async fn post_form(&self, path: &str, form: FormData) -> Result<Value, Error> {
        self.request_json(Method::POST, path, Payload::Form(form)).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, Error> {
        self.request_json(Method::PUT, path, Payload::Json(body)).await
    }

    async fn patch(&self, path: &str, body: Value) -> Result<Value, Error> {
        self.request_json(Method::PATCH, path, Payload::Json(body)).await
    }

    async fn delete(&self, path: &str, params: &Params) -> Result<Value, Error> {
        self.request_json(Method::DELETE, path, Payload::Params(params.clone()))
            .await
    }
}

fn build_reqwest_client(config: &GaroonConfig) -> Result<reqwest::Client, Error> {
    let mut builder = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(&config.user_agent);

    if let Some(proxy) = &config.proxy {
        let mut p = reqwest::Proxy::all(format!("http://{}:{}", proxy.host, proxy.port))
            .map_err(|e| Error::Config(format!("invalid proxy settings: {e}")))?;
        if let Some(auth) = &proxy.auth {
            p = p.basic_auth(&auth.username, &auth.password);
        }
        builder = builder.proxy(p);
    }

    builder.build().map_err(|e| Error::Config(e.to_string()))
}

/// Session-token cache with single-flight refresh.
///
/// Concurrent calls needing a token serialize on the internal mutex: the
/// first performs the fetch while the others wait. Waiters queued behind a
/// refresh share its outcome, including its failure; calls arriving after
/// a failure start a fresh refresh.
#[derive(Debug)]
pub(crate) struct SessionCache {
    http: reqwest::Client,
    endpoint: String,
    generation: AtomicU64,
    slot: tokio::sync::Mutex<SessionSlot>,
}

#[derive(Debug, Default)]
struct SessionSlot {
    token: Option<String>,
    last_error: Option<String>,
}

#[derive(serde::Deserialize)]
struct SessionTokenResponse {
    token: String,
}

impl SessionCache {
    pub(crate) fn new(http: reqwest::Client, endpoint: String) -> Self {
        Self {
            http,
            endpoint,
            generation: AtomicU64::new(0),
            slot: tokio::sync::Mutex::new(SessionSlot::default()),
        }
    }

    /// Returns the cached token, fetching one if none is cached yet.
    pub(crate) async fn resolve(&self) -> Result<String, Error> {
        let entered = self.generation.load(Ordering::Acquire);
        let mut slot = self.slot.lock().await;
        if let Some(token) = &slot.token {
            return Ok(token.clone());
        }
        if self.generation.load(Ordering::Acquire) != entered {
            // A refresh completed while this call was queued; share its
            // outcome instead of issuing another fetch.
            if let Some(message) = &slot.last_error {
                return Err(Error::Transport(message.clone()));
            }
        }

        tracing::debug!(endpoint = %self.endpoint, "requesting session token");
        let outcome = self.fetch().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        match outcome {
            Ok(token) => {
                slot.last_error = None;
                slot.token = Some(token.clone());
                Ok(token)
            }
            Err(error) => {
                slot.last_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    async fn fetch(&self) -> Result<String, Error> {
        let resp = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Transport(format!(
                "session token request failed with status {status}"
            )));
        }
        let body: SessionTokenResponse = resp
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;
        Ok(body.token)
    }
}
