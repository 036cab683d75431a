// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use diario_core::{Aula, Failure, FailureKind};
use jiff::civil::Date;

/// Asserts that a failure is a validation failure carrying an error for `field`.
///
/// # Panics
///
/// Panics if the failure is of another kind or lacks the field.
pub fn assert_field_error(failure: &Failure, field: &str) {
    assert_eq!(failure.kind, FailureKind::Validation, "not a validation failure: {failure:?}");
    assert!(
        failure.errors.contains_key(field),
        "missing field error '{field}' in {:?}",
        failure.errors
    );
}

/// Asserts that the sessions fall exactly on the given dates, in order.
///
/// # Panics
///
/// Panics if the dates differ.
pub fn assert_sessions_on(aulas: &[Aula], dates: &[Date]) {
    let actual: Vec<_> = aulas.iter().map(|a| a.data).collect();
    assert_eq!(actual, dates, "session dates mismatch");
}
