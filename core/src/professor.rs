// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::store::{Slice, Store};
use crate::{Resource, ResourceKind};

/// A professor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professor {
    /// Full name.
    pub nome: String,

    /// Contact e-mail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Contact phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
}

impl Resource for Professor {
    const KIND: ResourceKind = ResourceKind::Professor;

    fn slice(store: &Store) -> &Slice<Self> {
        &store.professores
    }
}

/// Patch for a professor, allowing partial updates.
#[derive(Debug, Default, Clone)]
pub struct ProfessorPatch {
    /// New name.
    pub nome: Option<String>,

    /// New email, `Some(None)` clears it.
    pub email: Option<Option<String>>,

    /// New phone number, `Some(None)` clears it.
    pub telefone: Option<Option<String>>,
}

impl ProfessorPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.nome.is_none() && self.email.is_none() && self.telefone.is_none()
    }

    /// Applies the patch to a professor, modifying it in place.
    pub fn apply_to<'a>(&self, professor: &'a mut Professor) -> &'a mut Professor {
        if let Some(nome) = &self.nome {
            professor.nome.clone_from(nome);
        }
        if let Some(email) = &self.email {
            professor.email.clone_from(email);
        }
        if let Some(telefone) = &self.telefone {
            professor.telefone.clone_from(telefone);
        }
        professor
    }
}
