// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Garoon authentication method.
///
/// Exactly one method is configured per client and it is used, unchanged,
/// for every request that client issues.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// Password authentication (`X-Cybozu-Authorization` header).
    #[serde(rename = "password")]
    Password {
        /// Login name.
        username: String,
        /// Password.
        password: String,
    },
    /// Session authentication (CSRF token).
    ///
    /// A pre-issued token is sent verbatim in the `X-Garoon-CSRF-Token`
    /// header. When `token` is `None`, the client obtains one from the
    /// session endpoint on first use and caches it for its lifetime.
    #[serde(rename = "session")]
    Session {
        /// Pre-issued CSRF token.
        #[serde(default)]
        token: Option<String>,
    },
    /// OAuth bearer token authentication.
    #[serde(rename = "oauth")]
    OAuth {
        /// Access token.
        token: String,
    },
}

/// Forward proxy credentials.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ProxyAuth {
    /// Proxy username.
    pub username: String,
    /// Proxy password.
    pub password: String,
}

/// Forward proxy settings, applied to every request the client issues.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ProxyConfig {
    /// Proxy host.
    pub host: String,
    /// Proxy port.
    pub port: u16,
    /// Optional proxy credentials.
    #[serde(default)]
    pub auth: Option<ProxyAuth>,
}

/// Garoon server configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GaroonConfig {
    /// Base URL of the Garoon instance (e.g. `https://example.cybozu.com/g`).
    pub base_url: String,
    /// Authentication method.
    pub auth: AuthMethod,
    /// Optional forward proxy.
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("garoon-rest/", env!("CARGO_PKG_VERSION")).to_string()
}

impl GaroonConfig {
    /// Creates a configuration with default timeout and user agent.
    #[must_use]
    pub fn new(base_url: impl Into<String>, auth: AuthMethod) -> Self {
        Self {
            base_url: base_url.into(),
            auth,
            proxy: None,
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
