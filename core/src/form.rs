// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Working list of a contract's sessions while it is being edited.

use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use bimap::BiBTreeMap;
use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use crate::error::{Failure, FieldErrors};
use crate::{Aula, AulaPatch, Record};

/// Identity of a session inside a form, assigned 1, 2, 3, ... and never reused.
///
/// It is unrelated to the id the backend assigns once the session is persisted, see
/// [`AulaForm::remote_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocalId(NonZeroU32);

impl LocalId {
    /// The numeric value.
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocalId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.strip_prefix('#')
            .unwrap_or(s)
            .parse::<NonZeroU32>()
            .map(LocalId)
            .map_err(|_| format!("Invalid session number '{s}'"))
    }
}

/// Errors of the session form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Another session already takes the date.
    #[error("A session on {0} already exists")]
    DuplicateDate(Date),

    /// No session has the id.
    #[error("Session #{0} not found")]
    UnknownEntry(LocalId),

    /// The session ends before it starts.
    #[error("Session must end after it starts ({inicio}-{fim})")]
    InvalidTimeRange {
        /// Start time.
        inicio: Time,
        /// End time.
        fim: Time,
    },
}

impl From<FormError> for Failure {
    fn from(e: FormError) -> Self {
        let field = match e {
            FormError::DuplicateDate(_) => "data",
            FormError::UnknownEntry(_) => "id",
            FormError::InvalidTimeRange { .. } => "horaFim",
        };
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), e.to_string());
        Failure::validation(e.to_string(), errors)
    }
}

/// A session in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEntry {
    /// Local identity.
    pub id: LocalId,

    /// The session.
    pub aula: Aula,
}

/// A session taken out of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    /// The removed entry.
    pub entry: FormEntry,

    /// Its durable id, when it had already been persisted.
    pub remote_id: Option<i64>,
}

/// What has to be sent to the backend to persist the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormChanges {
    /// Sessions never persisted.
    pub create: Vec<FormEntry>,

    /// Persisted sessions edited since, with their durable id.
    pub update: Vec<(FormEntry, i64)>,

    /// Durable ids of persisted sessions removed from the form.
    pub delete: Vec<i64>,
}

impl FormChanges {
    /// Whether there is nothing to send.
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.update.is_empty() && self.delete.is_empty()
    }
}

/// The working list of a contract's sessions.
///
/// At most one session exists per calendar date.
#[derive(Debug, Clone, Default)]
pub struct AulaForm {
    entries: Vec<FormEntry>,
    issued: u32,
    remote: BiBTreeMap<LocalId, i64>,
    dirty: BTreeSet<LocalId>,
    removed: Vec<i64>,
}

impl AulaForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads persisted sessions for editing.
    ///
    /// A session on an already taken date is left out and scheduled for deletion.
    pub fn from_records(records: Vec<Record<Aula>>) -> Self {
        let mut form = Self::new();
        for record in records {
            if form.date_taken(record.data.data, None) {
                tracing::warn!(
                    id = record.id,
                    data = %record.data.data,
                    "removing saved session on a taken date"
                );
                form.removed.push(record.id);
                continue;
            }
            let id = form.next_id();
            form.remote.insert(id, record.id);
            form.entries.push(FormEntry {
                id,
                aula: record.data,
            });
        }
        form
    }

    /// Sessions in insertion order.
    pub fn entries(&self) -> &[FormEntry] {
        &self.entries
    }

    /// The session with the given id.
    pub fn get(&self, id: LocalId) -> Option<&Aula> {
        self.entries.iter().find(|a| a.id == id).map(|a| &a.aula)
    }

    /// Number of sessions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is no session.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seeds the form with generated sessions, only if it is empty.
    ///
    /// Returns whether the seed was applied. Sessions on an already taken date are
    /// dropped.
    pub fn replace_all(&mut self, aulas: Vec<Aula>) -> bool {
        if !self.entries.is_empty() {
            tracing::debug!("form already has sessions, ignoring seed");
            return false;
        }

        for aula in aulas {
            if self.date_taken(aula.data, None) {
                tracing::warn!(data = %aula.data, "dropping generated session on a taken date");
                continue;
            }
            let id = self.next_id();
            self.entries.push(FormEntry { id, aula });
        }
        true
    }

    /// Discards the current sessions and seeds the form again.
    ///
    /// Persisted sessions among the discarded ones are scheduled for deletion.
    pub fn regenerate(&mut self, aulas: Vec<Aula>) {
        for entry in std::mem::take(&mut self.entries) {
            if let Some((_, remote)) = self.remote.remove_by_left(&entry.id) {
                self.removed.push(remote);
            }
        }
        self.dirty.clear();
        self.replace_all(aulas);
    }

    /// Appends a session and returns its new id.
    ///
    /// # Errors
    ///
    /// Fails when a session already exists on the same date or the session ends before
    /// it starts.
    pub fn add(&mut self, aula: Aula) -> Result<LocalId, FormError> {
        check_time_range(&aula)?;
        if self.date_taken(aula.data, None) {
            return Err(FormError::DuplicateDate(aula.data));
        }

        let id = self.next_id();
        self.entries.push(FormEntry { id, aula });
        Ok(id)
    }

    /// Merges `patch` into the session with the given id.
    ///
    /// # Errors
    ///
    /// Fails when the id is unknown, the new date collides with another session, or
    /// the session would end before it starts. The session is unchanged on error.
    pub fn edit(&mut self, id: LocalId, patch: &AulaPatch) -> Result<&Aula, FormError> {
        let index = self.index_of(id)?;

        let mut aula = self.entries[index].aula.clone();
        patch.apply_to(&mut aula);
        check_time_range(&aula)?;
        if aula.data != self.entries[index].aula.data && self.date_taken(aula.data, Some(id)) {
            return Err(FormError::DuplicateDate(aula.data));
        }

        if self.remote.contains_left(&id) {
            self.dirty.insert(id);
        }
        let entry = &mut self.entries[index];
        entry.aula = aula;
        Ok(&entry.aula)
    }

    /// Removes the session with the given id; the other sessions keep their ids.
    ///
    /// # Errors
    ///
    /// Fails when the id is unknown.
    pub fn remove(&mut self, id: LocalId) -> Result<Removed, FormError> {
        let index = self.index_of(id)?;
        let entry = self.entries.remove(index);
        self.dirty.remove(&id);
        let remote_id = self.remote.remove_by_left(&id).map(|(_, remote)| remote);
        if let Some(remote) = remote_id {
            self.removed.push(remote);
        }
        Ok(Removed { entry, remote_id })
    }

    /// The sessions ordered by date, ready to be submitted.
    pub fn to_payload(&self) -> Vec<Aula> {
        let mut aulas: Vec<_> = self.entries.iter().map(|a| a.aula.clone()).collect();
        aulas.sort_by_key(|a| (a.data, a.hora_inicio));
        aulas
    }

    /// Records the durable id of a session once persisted.
    ///
    /// # Errors
    ///
    /// Fails when the id is unknown.
    pub fn bind(&mut self, local: LocalId, remote: i64) -> Result<(), FormError> {
        self.index_of(local)?;
        self.remote.insert(local, remote);
        self.dirty.remove(&local);
        Ok(())
    }

    /// The durable id of a session, if persisted.
    pub fn remote_id(&self, local: LocalId) -> Option<i64> {
        self.remote.get_by_left(&local).copied()
    }

    /// The local id of a persisted session.
    pub fn local_id(&self, remote: i64) -> Option<LocalId> {
        self.remote.get_by_right(&remote).copied()
    }

    /// What has to be sent to persist the form, creations in date order.
    pub fn changes(&self) -> FormChanges {
        let mut create: Vec<_> = self
            .entries
            .iter()
            .filter(|a| !self.remote.contains_left(&a.id))
            .cloned()
            .collect();
        create.sort_by_key(|a| (a.aula.data, a.aula.hora_inicio));

        let update = self
            .entries
            .iter()
            .filter(|a| self.dirty.contains(&a.id))
            .filter_map(|a| self.remote_id(a.id).map(|remote| (a.clone(), remote)))
            .collect();

        FormChanges {
            create,
            update,
            delete: self.removed.clone(),
        }
    }

    /// Marks an edited session as persisted.
    pub fn mark_synced(&mut self, local: LocalId) {
        self.dirty.remove(&local);
    }

    /// Marks the deletion of a removed session as persisted.
    pub fn forget_removed(&mut self, remote: i64) {
        self.removed.retain(|a| *a != remote);
    }

    fn next_id(&mut self) -> LocalId {
        let id = LocalId(NonZeroU32::MIN.saturating_add(self.issued));
        self.issued += 1;
        id
    }

    fn index_of(&self, id: LocalId) -> Result<usize, FormError> {
        self.entries
            .iter()
            .position(|a| a.id == id)
            .ok_or(FormError::UnknownEntry(id))
    }

    fn date_taken(&self, data: Date, except: Option<LocalId>) -> bool {
        self.entries
            .iter()
            .any(|a| a.aula.data == data && Some(a.id) != except)
    }
}

fn check_time_range(aula: &Aula) -> Result<(), FormError> {
    if aula.hora_fim <= aula.hora_inicio {
        return Err(FormError::InvalidTimeRange {
            inicio: aula.hora_inicio,
            fim: aula.hora_fim,
        });
    }
    Ok(())
}
