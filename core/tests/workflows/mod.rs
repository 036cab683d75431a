// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the diario-core crate.
//!
//! These tests drive the dispatchers against the in-memory backend and check the
//! resulting store state, including the contract session form from generation to
//! submission.

mod contract_sessions;
mod crud_lifecycle;
mod stale_responses;
