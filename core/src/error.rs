// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

/// Field-level error messages, keyed by wire field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Message used when the transport gives nothing better.
pub const FALLBACK_MESSAGE: &str = "Something went wrong, please try again";

/// Category of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The request was rejected with field-level errors.
    Validation,

    /// The entity does not exist.
    NotFound,

    /// The session expired or the credentials were refused.
    Unauthorized,

    /// The server could not be reached.
    Network,

    /// Anything else.
    Other,
}

/// A failed operation, normalized at the API boundary.
///
/// This is the only error shape that reaches the store and the user interface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Failure {
    /// Category of the failure.
    pub kind: FailureKind,

    /// Message to show to the user.
    pub message: String,

    /// Field-level errors, empty unless `kind` is `Validation`.
    pub errors: FieldErrors,

    /// HTTP status, when the failure came from a response.
    pub status: Option<u16>,
}

impl Failure {
    /// Creates a failure with no field errors and no status.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind,
            message: if message.trim().is_empty() {
                FALLBACK_MESSAGE.to_string()
            } else {
                message
            },
            errors: FieldErrors::new(),
            status: None,
        }
    }

    /// Creates a validation failure.
    pub fn validation(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self::new(FailureKind::Validation, message).with_errors(errors)
    }

    /// Sets the field errors.
    #[must_use]
    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }

    /// Sets the HTTP status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether the user has to log in again.
    pub fn is_unauthorized(&self) -> bool {
        self.kind == FailureKind::Unauthorized
    }
}

/// Input rejected before anything is sent or generated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Summary message.
    pub message: String,

    /// Field-level errors, keyed by wire field name.
    pub errors: FieldErrors,
}

impl ValidationError {
    /// Creates a validation error from collected field errors.
    pub fn new(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }
}

impl From<ValidationError> for Failure {
    fn from(e: ValidationError) -> Self {
        Failure::validation(e.message, e.errors)
    }
}
