// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Response envelopes of the REST API.

use std::collections::BTreeMap;

use diario_core::FieldErrors;
use serde::Deserialize;

/// Single-entity response, `{ data, message? }`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    /// The payload.
    pub data: T,
}

/// Error response, `{ message, errors }`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    /// Summary message.
    #[serde(default)]
    pub message: Option<String>,

    /// Field errors, in any of the shapes the backend produces.
    #[serde(default)]
    pub errors: Option<ErrorDetails>,
}

/// The `errors` member of an error response.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    /// `{ "field": "message" }` or `{ "field": ["message", ...] }`.
    Fields(BTreeMap<String, FieldMessages>),

    /// `[{ "field": "...", "message": "..." }, ...]`.
    List(Vec<FieldError>),

    /// A bare message.
    Message(String),
}

/// Messages of one field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FieldMessages {
    /// A single message.
    One(String),

    /// Several messages.
    Many(Vec<String>),
}

/// One entry of a list of field errors.
#[derive(Debug, Deserialize)]
pub struct FieldError {
    /// Wire field name; also accepted as `path` or `param`.
    #[serde(alias = "path", alias = "param")]
    pub field: Option<String>,

    /// The message; also accepted as `msg`.
    #[serde(alias = "msg")]
    pub message: String,
}

impl ErrorBody {
    /// Parses an error response, falling back to an empty body.
    pub fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    /// The message, if not blank.
    pub fn message(&self) -> Option<String> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(ToString::to_string)
    }

    /// The field errors, flattened to one message per field.
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match &self.errors {
            Some(ErrorDetails::Fields(fields)) => {
                for (field, messages) in fields {
                    let message = match messages {
                        FieldMessages::One(a) => a.clone(),
                        FieldMessages::Many(a) => a.join(", "),
                    };
                    errors.insert(field.clone(), message);
                }
            }
            Some(ErrorDetails::List(list)) => {
                for e in list {
                    let field = e.field.clone().unwrap_or_else(|| "_".to_string());
                    errors
                        .entry(field)
                        .and_modify(|a| {
                            a.push_str(", ");
                            a.push_str(&e.message);
                        })
                        .or_insert_with(|| e.message.clone());
                }
            }
            Some(ErrorDetails::Message(message)) => {
                errors.insert("_".to_string(), message.clone());
            }
            None => {}
        }
        errors
    }
}
