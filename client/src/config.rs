// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use reqwest::RequestBuilder;

use crate::error::ApiError;

/// Request timeout used when the configuration leaves it out.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("diario-client/", env!("CARGO_PKG_VERSION"));

/// Credentials sent with every request, selected by the `type` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthMethod {
    /// Anonymous access.
    #[default]
    None,

    /// HTTP basic authentication.
    Basic {
        /// Login.
        username: String,
        /// Password.
        password: String,
    },

    /// Token issued by the login endpoint, sent as `Authorization: Bearer`.
    Bearer {
        /// The token.
        token: String,
    },
}

impl AuthMethod {
    pub(crate) fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            AuthMethod::None => req,
            AuthMethod::Basic { username, password } => req.basic_auth(username, Some(password)),
            AuthMethod::Bearer { token } => req.bearer_auth(token),
        }
    }
}

/// Where the backend lives and how to talk to it, the `[api]` section of the config.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ApiConfig {
    /// Root of every resource path, e.g. `https://diario.example.com/api`.
    pub base_url: String,

    /// Credentials.
    #[serde(default)]
    pub auth: AuthMethod,

    /// Request timeout in seconds.
    #[serde(default = "ApiConfig::default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent, `diario-client/<version>` when unset.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl ApiConfig {
    /// Anonymous access to the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth: AuthMethod::None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }

    const fn default_timeout_secs() -> u64 {
        DEFAULT_TIMEOUT_SECS
    }

    /// Checks that the base URL is an absolute HTTP(S) URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when it is empty or has another scheme.
    pub fn validate(&self) -> Result<(), ApiError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(ApiError::Config("base_url is required".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "base_url must start with http:// or https://, got '{base_url}'"
            )));
        }
        Ok(())
    }

    /// Absolute URL of a resource path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The user agent sent with every request.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(USER_AGENT)
    }
}
