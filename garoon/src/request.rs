// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Request descriptor and the builder turning (method, path, params)
//! triples into fully-specified requests.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::config::{AuthMethod, GaroonConfig};
use crate::error::Error;
use crate::http::{FormData, SessionCache};
use crate::params::Params;

const HEADER_PASSWORD_AUTH: &str = "X-Cybozu-Authorization";
const HEADER_CSRF_TOKEN: &str = "X-Garoon-CSRF-Token";
const HEADER_REQUESTED_WITH: &str = "X-Requested-With";
const HEADER_AUTHORIZATION: &str = "Authorization";
const HEADER_CONTENT_TYPE: &str = "Content-Type";

/// Per-call payload handed to [`RequestConfigBuilder::build`].
///
/// Placement is decided by the verb: GET/DELETE payloads must be flat
/// [`Params`] and become the query string; POST/PUT/PATCH payloads become
/// the request body.
#[derive(Debug)]
pub enum Payload {
    /// Flat, already-encoded parameters.
    Params(Params),
    /// A JSON body.
    Json(Value),
    /// A multipart form body.
    Form(FormData),
}

/// Serialized request body carried by a [`RequestConfig`].
#[derive(Debug)]
pub enum RequestBody {
    /// JSON value, serialized by the transport.
    Json(Value),
    /// Multipart form; the transport supplies the boundary header.
    Form(FormData),
}

/// How the response body is to be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Decode as JSON.
    Json,
    /// Return raw bytes, skipping text/JSON decoding.
    Binary,
}

/// A fully-resolved, transport-ready description of one HTTP call.
///
/// Built fresh per call and never mutated afterwards.
#[derive(Debug)]
pub struct RequestConfig {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL, query string included.
    pub url: String,
    /// Headers in the order they are to be sent.
    pub headers: Vec<(String, String)>,
    /// Request body, when the verb carries one.
    pub body: Option<RequestBody>,
    /// Expected response decoding.
    pub response_kind: ResponseKind,
}

/// Resolved authentication for the client's lifetime.
#[derive(Debug)]
enum AuthState {
    /// Headers computable once, at construction.
    Static(Vec<(String, String)>),
    /// Session token resolved on first use, single-flight.
    Session(SessionCache),
}

/// Composes the base URL, the authentication method and per-call
/// parameters into [`RequestConfig`] values.
///
/// # Example
///
/// ```ignore
/// use garoon_rest::{AuthMethod, GaroonConfig, Payload, RequestConfigBuilder};
///
/// # async fn example() -> Result<(), garoon_rest::Error> {
/// let config = GaroonConfig::new(
///     "https://example.cybozu.com/g",
///     AuthMethod::Password {
///         username: "user".to_string(),
///         password: "pass".to_string(),
///     },
/// );
/// let builder = RequestConfigBuilder::new(config, reqwest::Client::new())?;
/// let request = builder
///     .build(reqwest::Method::GET, "/api/v1/schedule/events", Payload::Params(Default::default()))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RequestConfigBuilder {
    base: String,
    auth: AuthState,
}

impl RequestConfigBuilder {
    /// Creates a builder, validating the configuration.
    ///
    /// The `http` client is used only to resolve session tokens; passing
    /// the same client the transport uses keeps proxy and timeout settings
    /// consistent for that resolution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the base URL is not an absolute
    /// http(s) URL or a credential field is empty.
    pub fn new(config: GaroonConfig, http: reqwest::Client) -> Result<Self, Error> {
        let url = Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("invalid base URL `{}`: {e}", config.base_url)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::Config(format!(
                "unsupported base URL scheme `{}`",
                url.scheme()
            )));
        }

        let base = url.as_str().trim_end_matches('/').to_string();
        let auth = Self::resolve_auth(&config.auth, &base, http)?;
        Ok(Self { base, auth })
    }

    fn resolve_auth(
        auth: &AuthMethod,
        base: &str,
        http: reqwest::Client,
    ) -> Result<AuthState, Error> {
        match auth {
            AuthMethod::Password { username, password } => {
                if username.is_empty() || password.is_empty() {
                    return Err(Error::Config(
                        "password auth requires a username and a password".to_string(),
                    ));
                }
                let value = STANDARD.encode(format!("{username}:{password}"));
                Ok(AuthState::Static(vec![(
                    HEADER_PASSWORD_AUTH.to_string(),
                    value,
                )]))
            }
            AuthMethod::Session { token: Some(token) } => {
                if token.is_empty() {
                    return Err(Error::Config(
                        "session auth requires a non-empty token".to_string(),
                    ));
                }
                Ok(AuthState::Static(session_headers(token)))
            }
            AuthMethod::Session { token: None } => {
                let endpoint = format!("{base}/api/v1/session/token");
                Ok(AuthState::Session(SessionCache::new(http, endpoint)))
            }
            AuthMethod::OAuth { token } => {
                if token.is_empty() {
                    return Err(Error::Config(
                        "oauth auth requires a non-empty token".to_string(),
                    ));
                }
                Ok(AuthState::Static(vec![(
                    HEADER_AUTHORIZATION.to_string(),
                    format!("Bearer {token}"),
                )]))
            }
        }
    }

    /// Builds a request expecting a JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the payload does not fit the verb,
    /// or an error from session-token resolution.
    pub async fn build(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<RequestConfig, Error> {
        self.build_inner(method, path, payload, ResponseKind::Json)
            .await
    }

    /// Builds a request expecting a raw binary response.
    ///
    /// # Errors
    ///
    /// Same conditions as [`build`](Self::build).
    pub async fn build_binary(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<RequestConfig, Error> {
        self.build_inner(method, path, payload, ResponseKind::Binary)
            .await
    }

    async fn build_inner(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        response_kind: ResponseKind,
    ) -> Result<RequestConfig, Error> {
        let mut headers = self.auth_headers().await?;
        let mut url = self.join(path)?;

        let body = if method == Method::GET || method == Method::DELETE {
            let Payload::Params(params) = payload else {
                return Err(Error::Encoding(format!(
                    "{method} requests take flat parameters, not a body"
                )));
            };
            append_query(&mut url, &params)?;
            None
        } else {
            match payload {
                Payload::Params(params) => {
                    headers.push(json_content_type());
                    Some(RequestBody::Json(Value::Object(params)))
                }
                Payload::Json(value) => {
                    headers.push(json_content_type());
                    Some(RequestBody::Json(value))
                }
                // The multipart boundary is only known to the HTTP layer,
                // which adds the content type itself.
                Payload::Form(form) => Some(RequestBody::Form(form)),
            }
        };

        Ok(RequestConfig {
            method,
            url: url.to_string(),
            headers,
            body,
            response_kind,
        })
    }

    /// Resolves the auth headers for one request.
    ///
    /// Asynchronous only because session-token resolution may be; no
    /// network I/O happens here for the other methods.
    async fn auth_headers(&self) -> Result<Vec<(String, String)>, Error> {
        match &self.auth {
            AuthState::Static(headers) => Ok(headers.clone()),
            AuthState::Session(cache) => {
                let token = cache.resolve().await?;
                Ok(session_headers(&token))
            }
        }
    }

    /// Joins the base URL and a path with exactly one separating slash.
    fn join(&self, path: &str) -> Result<Url, Error> {
        let url = if path.starts_with('/') {
            format!("{}{path}", self.base)
        } else {
            format!("{}/{path}", self.base)
        };
        Url::parse(&url).map_err(|e| Error::Encoding(format!("invalid request path `{path}`: {e}")))
    }
}

fn session_headers(token: &str) -> Vec<(String, String)> {
    vec![
        (HEADER_CSRF_TOKEN.to_string(), token.to_string()),
        (HEADER_REQUESTED_WITH.to_string(), "XMLHttpRequest".to_string()),
    ]
}

fn json_content_type() -> (String, String) {
    (HEADER_CONTENT_TYPE.to_string(), "application/json".to_string())
}

/// Appends pre-flattened parameters to the query string.
///
/// Values must already be scalars; the builder never re-flattens.
fn append_query(url: &mut Url, params: &Params) -> Result<(), Error> {
    if params.is_empty() {
        return Ok(());
    }

    let mut pairs = url.query_pairs_mut();
    for (key, value) in params {
        let value = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => {
                return Err(Error::Encoding(format!(
                    "parameter `{key}` was not flattened to a scalar"
                )));
            }
        };
        pairs.append_pair(key, &value);
    }
    drop(pairs);
    Ok(())
}
