// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use diario_core::{FALLBACK_MESSAGE, Failure, FailureKind, FieldErrors};

/// REST client errors.
#[non_exhaustive]
#[derive(Debug)]
pub enum ApiError {
    /// The server could not be reached, or did not answer in time.
    Network(String),

    /// Credentials missing, refused or expired (401/403).
    Unauthorized {
        /// HTTP status.
        status: u16,
        /// Message from the server, if any.
        message: Option<String>,
    },

    /// Resource not found (404).
    NotFound(Option<String>),

    /// Request rejected with field-level errors (400/422).
    Validation {
        /// HTTP status.
        status: u16,
        /// Message from the server, if any.
        message: Option<String>,
        /// Field errors, keyed by wire field name.
        errors: FieldErrors,
    },

    /// Any other unsuccessful status.
    Http {
        /// HTTP status.
        status: u16,
        /// Message from the server, if any.
        message: Option<String>,
    },

    /// Invalid response from server.
    InvalidResponse(String),

    /// Configuration error.
    Config(String),
}

impl ApiError {
    /// HTTP status of the response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. }
            | Self::Validation { status, .. }
            | Self::Http { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            Self::Network(_) | Self::InvalidResponse(_) | Self::Config(_) => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "Network error: {e}"),
            Self::Unauthorized { status, message } => match message {
                Some(m) => write!(f, "Unauthorized ({status}): {m}"),
                None => write!(f, "Unauthorized ({status})"),
            },
            Self::NotFound(message) => match message {
                Some(m) => write!(f, "Not found: {m}"),
                None => write!(f, "Not found"),
            },
            Self::Validation {
                status,
                message,
                errors,
            } => {
                write!(f, "Invalid request ({status})")?;
                if let Some(m) = message {
                    write!(f, ": {m}")?;
                }
                for (field, e) in errors {
                    write!(f, "; {field}: {e}")?;
                }
                Ok(())
            }
            Self::Http { status, message } => match message {
                Some(m) => write!(f, "HTTP error {status}: {m}"),
                None => write!(f, "HTTP error {status}"),
            },
            Self::InvalidResponse(e) => write!(f, "Invalid server response: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else if e.is_builder() {
            Self::Config(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}

/// Normalizes a client error into the failure shown to the user.
impl From<ApiError> for Failure {
    fn from(e: ApiError) -> Self {
        let status = e.status();
        let failure = match e {
            ApiError::Network(e) => {
                tracing::debug!("network error: {e}");
                Failure::new(
                    FailureKind::Network,
                    "Could not reach the server, check your connection",
                )
            }
            ApiError::Unauthorized { message, .. } => Failure::new(
                FailureKind::Unauthorized,
                message.unwrap_or_else(|| "Your session has expired, please log in again".into()),
            ),
            ApiError::NotFound(message) => Failure::new(
                FailureKind::NotFound,
                message.unwrap_or_else(|| "Not found".into()),
            ),
            ApiError::Validation {
                message, errors, ..
            } => Failure::validation(message.unwrap_or_else(|| "Invalid data".into()), errors),
            ApiError::Http { message, .. } => {
                Failure::new(FailureKind::Other, message.unwrap_or_default())
            }
            ApiError::InvalidResponse(e) | ApiError::Config(e) => {
                tracing::debug!("client error: {e}");
                Failure::new(FailureKind::Other, FALLBACK_MESSAGE)
            }
        };

        match status {
            Some(status) => failure.with_status(status),
            None => failure,
        }
    }
}
