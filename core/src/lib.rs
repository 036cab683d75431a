// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the class diary: domain types, the session generator, the session form and
//! the request lifecycle of every resource.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::pedantic
)]
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

mod aluno;
mod api;
mod aula;
mod config;
mod contrato;
pub mod datetime;
mod diario;
mod error;
mod form;
mod professor;
mod request;
pub mod schedule;
mod store;
mod types;
pub mod ui;

pub use crate::aluno::{Aluno, AlunoPatch};
pub use crate::api::{Api, AulaApi, ResourceApi};
pub use crate::aula::{Aula, AulaPatch, TipoAula};
pub use crate::config::{APP_NAME, Config, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use crate::contrato::{Contrato, DiaAula, DiaSemana};
pub use crate::diario::Diario;
pub use crate::error::{FALLBACK_MESSAGE, Failure, FailureKind, FieldErrors, ValidationError};
pub use crate::form::{AulaForm, FormChanges, FormEntry, FormError, LocalId, Removed};
pub use crate::professor::{Professor, ProfessorPatch};
pub use crate::request::{Operation, Outcome, RequestState, ResourceState, Ticket, Transition};
pub use crate::schedule::GenerateRequest;
pub use crate::store::{Dispatcher, Slice, Store, SubmitSummary};
pub use crate::types::{Page, Query, Record, Resource, ResourceKind};
