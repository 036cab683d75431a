// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::store::{Slice, Store};
use crate::{Resource, ResourceKind};

/// A student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aluno {
    /// Full name.
    pub nome: String,

    /// Contact e-mail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Contact phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,

    /// Name of the legal guardian, for minors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsavel: Option<String>,

    /// Free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacao: Option<String>,
}

impl Resource for Aluno {
    const KIND: ResourceKind = ResourceKind::Aluno;

    fn slice(store: &Store) -> &Slice<Self> {
        &store.alunos
    }
}

/// Patch for a student, allowing partial updates.
#[derive(Debug, Default, Clone)]
pub struct AlunoPatch {
    /// The name, if it changes.
    pub nome: Option<String>,

    /// The e-mail, `Some(None)` clears it.
    pub email: Option<Option<String>>,

    /// The phone, `Some(None)` clears it.
    pub telefone: Option<Option<String>>,

    /// The guardian, `Some(None)` clears it.
    pub responsavel: Option<Option<String>>,

    /// The note, `Some(None)` clears it.
    pub observacao: Option<Option<String>>,
}

impl AlunoPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.nome.is_none()
            && self.email.is_none()
            && self.telefone.is_none()
            && self.responsavel.is_none()
            && self.observacao.is_none()
    }

    /// Applies the patch to a student, modifying it in place.
    pub fn apply_to<'a>(&self, aluno: &'a mut Aluno) -> &'a mut Aluno {
        if let Some(nome) = &self.nome {
            aluno.nome.clone_from(nome);
        }
        if let Some(email) = &self.email {
            aluno.email.clone_from(email);
        }
        if let Some(telefone) = &self.telefone {
            aluno.telefone.clone_from(telefone);
        }
        if let Some(responsavel) = &self.responsavel {
            aluno.responsavel.clone_from(responsavel);
        }
        if let Some(observacao) = &self.observacao {
            aluno.observacao.clone_from(observacao);
        }
        aluno
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_sets_and_clears_fields() {
        let mut aluno = Aluno {
            nome: "Ana".to_string(),
            email: Some("ana@example.com".to_string()),
            ..Default::default()
        };
        let patch = AlunoPatch {
            nome: Some("Ana Souza".to_string()),
            email: Some(None),
            telefone: Some(Some("1199999".to_string())),
            ..Default::default()
        };
        assert!(!patch.is_empty());

        patch.apply_to(&mut aluno);
        assert_eq!(aluno.nome, "Ana Souza");
        assert_eq!(aluno.email, None);
        assert_eq!(aluno.telefone.as_deref(), Some("1199999"));
    }

    #[test]
    fn optional_fields_are_omitted_on_the_wire() {
        let aluno = Aluno {
            nome: "Ana".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&aluno).unwrap(), r#"{"nome":"Ana"}"#);
    }
}
