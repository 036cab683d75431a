// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use diario_core::{Aluno, Config, Contrato, DiaAula, DiaSemana, Diario, TipoAula};
use jiff::civil::{Date, time};

use super::FakeApi;

/// Creates a test configuration with the given page size.
#[must_use]
pub fn test_config(page_size: u32) -> Config {
    Config {
        page_size,
        default_tipo: TipoAula::Padrao,
    }
}

/// Creates an application core over an empty in-memory backend.
#[must_use]
pub fn test_diario() -> Diario<FakeApi> {
    Diario::new(test_config(20), FakeApi::new())
}

/// Creates a student with only a name.
#[must_use]
pub fn test_aluno(nome: &str) -> Aluno {
    Aluno {
        nome: nome.to_string(),
        ..Default::default()
    }
}

/// Creates a weekly rule from whole hours.
#[must_use]
pub fn test_rule(dia: DiaSemana, start: i8, end: i8) -> DiaAula {
    DiaAula::new(dia, time(start, 0, 0, 0), time(end, 0, 0, 0))
}

/// Creates a contract for a student over the given range.
///
/// # Example
///
/// ```ignore
/// let contrato = test_contrato(1, date(2024, 1, 1), date(2024, 1, 14), vec![rule]);
/// ```
#[must_use]
pub fn test_contrato(aluno_id: i64, inicio: Date, fim: Date, rules: Vec<DiaAula>) -> Contrato {
    Contrato {
        aluno_id,
        professor_id: None,
        data_inicio: inicio,
        data_fim: fim,
        dias_aulas: rules,
        observacao: None,
    }
}
