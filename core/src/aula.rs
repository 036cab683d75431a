// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use crate::datetime::{serde_date, serde_time};
use crate::store::{Slice, Store};
use crate::{DiaAula, Resource, ResourceKind};

/// A class session on a concrete date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aula {
    /// Calendar date of the session.
    #[serde(with = "serde_date")]
    pub data: Date,

    /// Start time.
    #[serde(with = "serde_time")]
    pub hora_inicio: Time,

    /// End time.
    #[serde(with = "serde_time")]
    pub hora_fim: Time,

    /// Kind of session.
    #[serde(default)]
    pub tipo: TipoAula,

    /// Free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacao: Option<String>,

    /// The contract the session was generated for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrato_id: Option<i64>,

    /// The student attending the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aluno_id: Option<i64>,
}

impl Aula {
    /// Creates a standard session with no note.
    pub fn new(data: Date, hora_inicio: Time, hora_fim: Time) -> Self {
        Self {
            data,
            hora_inicio,
            hora_fim,
            tipo: TipoAula::default(),
            observacao: None,
            contrato_id: None,
            aluno_id: None,
        }
    }

    /// The occurrence of a weekly rule on the given date.
    pub fn from_rule(data: Date, rule: &DiaAula) -> Self {
        Self::new(data, rule.hora_inicio, rule.hora_fim)
    }

    /// Sets the contract.
    #[must_use]
    pub fn with_contrato(mut self, contrato_id: Option<i64>) -> Self {
        self.contrato_id = contrato_id;
        self
    }
}

impl Resource for Aula {
    const KIND: ResourceKind = ResourceKind::Aula;

    fn slice(store: &Store) -> &Slice<Self> {
        &store.aulas
    }
}

/// Kind of class session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TipoAula {
    /// A regular session from the weekly schedule.
    #[default]
    Padrao,

    /// A make-up session replacing a missed one.
    Reposicao,

    /// Anything else.
    Outra,
}

impl TipoAula {
    /// The wire label.
    pub const fn as_str(self) -> &'static str {
        match self {
            TipoAula::Padrao => "PADRAO",
            TipoAula::Reposicao => "REPOSICAO",
            TipoAula::Outra => "OUTRA",
        }
    }
}

impl fmt::Display for TipoAula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Patch for a session, allowing partial updates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AulaPatch {
    /// The date, if it changes.
    pub data: Option<Date>,

    /// The start time, if it changes.
    pub hora_inicio: Option<Time>,

    /// The end time, if it changes.
    pub hora_fim: Option<Time>,

    /// The kind, if it changes.
    pub tipo: Option<TipoAula>,

    /// The note, `Some(None)` clears it.
    pub observacao: Option<Option<String>>,
}

impl AulaPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
            && self.hora_inicio.is_none()
            && self.hora_fim.is_none()
            && self.tipo.is_none()
            && self.observacao.is_none()
    }

    /// Applies the patch to a session, modifying it in place.
    pub fn apply_to<'a>(&self, aula: &'a mut Aula) -> &'a mut Aula {
        if let Some(data) = self.data {
            aula.data = data;
        }
        if let Some(hora_inicio) = self.hora_inicio {
            aula.hora_inicio = hora_inicio;
        }
        if let Some(hora_fim) = self.hora_fim {
            aula.hora_fim = hora_fim;
        }
        if let Some(tipo) = self.tipo {
            aula.tipo = tipo;
        }
        if let Some(observacao) = &self.observacao {
            aula.observacao.clone_from(observacao);
        }
        aula
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;

    #[test]
    fn missing_tipo_defaults_to_padrao() {
        let json = r#"{"data":"2024-01-08","horaInicio":"09:00","horaFim":"10:00"}"#;
        let aula: Aula = serde_json::from_str(json).unwrap();
        assert_eq!(aula.tipo, TipoAula::Padrao);
        assert_eq!(aula.observacao, None);
    }

    #[test]
    fn serializes_without_empty_fields() {
        let aula = Aula::new(date(2024, 1, 8), time(9, 0, 0, 0), time(10, 0, 0, 0));
        assert_eq!(
            serde_json::to_string(&aula).unwrap(),
            r#"{"data":"2024-01-08","horaInicio":"09:00","horaFim":"10:00","tipo":"PADRAO"}"#
        );
    }

    #[test]
    fn patch_merges_only_set_fields() {
        let mut aula = Aula::new(date(2024, 1, 8), time(9, 0, 0, 0), time(10, 0, 0, 0));
        let patch = AulaPatch {
            tipo: Some(TipoAula::Reposicao),
            observacao: Some(Some("feriado".to_string())),
            ..Default::default()
        };
        patch.apply_to(&mut aula);
        assert_eq!(aula.data, date(2024, 1, 8));
        assert_eq!(aula.tipo, TipoAula::Reposicao);
        assert_eq!(aula.observacao.as_deref(), Some("feriado"));
        assert!(AulaPatch::default().is_empty());
    }
}
