// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Test data factories (fixtures)
//! - Custom assertion helpers
//! - An in-memory backend standing in for the REST API

mod assertions;
mod fake_api;
mod fixtures;

#[allow(unused_imports)]
pub use assertions::{assert_field_error, assert_sessions_on};
pub use fake_api::FakeApi;
#[allow(unused_imports)]
pub use fixtures::{test_aluno, test_config, test_contrato, test_diario, test_rule};
