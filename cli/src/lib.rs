// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of the class diary.

mod arg;
mod cli;
mod cmd_aluno;
mod cmd_aula;
mod cmd_contrato;
mod cmd_dia_aula;
mod cmd_generate_completion;
mod cmd_professor;
mod cmd_resource;
mod config;
mod formatter;
mod prompt;
mod table;
mod ui;
mod util;

pub use crate::cli::{Cli, Commands, run};
