// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion of a contract's weekly schedule into concrete class sessions.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::datetime::serde_date;
use crate::error::{FieldErrors, ValidationError};
use crate::{Aula, Contrato, DiaAula, DiaSemana, Record};

/// Input of the session generator: a date range and the weekly rules.
///
/// Dates are optional because the request usually comes straight from a form that
/// may be incomplete; missing fields are reported as field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// The contract the sessions belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrato_id: Option<i64>,

    /// First day, inclusive.
    #[serde(default, with = "serde_date::option")]
    pub data_inicio: Option<Date>,

    /// Last day, inclusive.
    #[serde(default, with = "serde_date::option")]
    pub data_fim: Option<Date>,

    /// Weekly rules, in the order the sessions of one day are emitted.
    #[serde(default)]
    pub dias_aulas: Vec<DiaAula>,
}

impl From<&Contrato> for GenerateRequest {
    fn from(contrato: &Contrato) -> Self {
        Self {
            contrato_id: None,
            data_inicio: Some(contrato.data_inicio),
            data_fim: Some(contrato.data_fim),
            dias_aulas: contrato.dias_aulas.clone(),
        }
    }
}

impl From<&Record<Contrato>> for GenerateRequest {
    fn from(record: &Record<Contrato>) -> Self {
        Self {
            contrato_id: Some(record.id),
            ..Self::from(&record.data)
        }
    }
}

/// Generates one session per (date, rule) pair where the date lies in
/// `[data_inicio, data_fim]` and falls on the rule's weekday.
///
/// Sessions are ordered by date, then by rule order, and are tagged as standard
/// sessions with no note.
///
/// At most one rule may exist per weekday, so every generated date is distinct and the
/// result can seed an [`AulaForm`](crate::AulaForm) without losing a session. A rule set
/// with two rules on the same weekday is rejected rather than expanded.
///
/// # Errors
///
/// Returns the field errors when a date is missing, the range is reversed, there is no
/// rule, a rule ends before it starts, or two rules share a weekday.
pub fn generate(request: &GenerateRequest) -> Result<Vec<Aula>, ValidationError> {
    let (inicio, fim) = validate(request)?;

    let mut aulas = Vec::new();
    let mut date = inicio;
    loop {
        let dia = DiaSemana::of(date);
        for rule in request.dias_aulas.iter().filter(|r| r.dia == dia) {
            aulas.push(Aula::from_rule(date, rule).with_contrato(request.contrato_id));
        }

        if date >= fim {
            break;
        }
        date = match date.tomorrow() {
            Ok(next) => next,
            Err(_) => break, // end of the supported calendar
        };
    }

    tracing::debug!(%inicio, %fim, count = aulas.len(), "generated sessions");
    Ok(aulas)
}

fn validate(request: &GenerateRequest) -> Result<(Date, Date), ValidationError> {
    let mut errors = FieldErrors::new();

    if request.data_inicio.is_none() {
        errors.insert("dataInicio".to_string(), "required".to_string());
    }
    if request.data_fim.is_none() {
        errors.insert("dataFim".to_string(), "required".to_string());
    }
    if let (Some(inicio), Some(fim)) = (request.data_inicio, request.data_fim)
        && inicio > fim
    {
        errors.insert(
            "dataFim".to_string(),
            format!("must not be before the start date {inicio}"),
        );
    }

    if request.dias_aulas.is_empty() {
        errors.insert("diasAulas".to_string(), "required".to_string());
    }

    let mut seen = BTreeMap::new();
    for (i, rule) in request.dias_aulas.iter().enumerate() {
        if rule.hora_fim <= rule.hora_inicio {
            errors.insert(
                format!("diasAulas[{i}].horaFim"),
                "must be after the start time".to_string(),
            );
        }
        if let Some(first) = seen.insert(rule.dia, i) {
            errors.insert(
                format!("diasAulas[{i}].dia"),
                format!("{} is already scheduled by rule {first}", rule.dia),
            );
        }
    }

    match (request.data_inicio, request.data_fim) {
        (Some(inicio), Some(fim)) if errors.is_empty() => Ok((inicio, fim)),
        _ => Err(ValidationError::new("Invalid class schedule", errors)),
    }
}
