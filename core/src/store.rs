// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Application state, one slice per resource, and the dispatcher driving requests
//! through it.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::api::{AulaApi, ResourceApi};
use crate::form::AulaForm;
use crate::request::{Operation, Outcome, ResourceState, Ticket, Transition};
use crate::schedule::{self, GenerateRequest};
use crate::{Aluno, Aula, Contrato, DiaAula, Failure, Page, Professor, Query, Record, Resource};

/// Shared state of one resource.
///
/// Cloning gives another handle to the same state.
#[derive(Debug)]
pub struct Slice<T> {
    inner: Arc<RwLock<ResourceState<T>>>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ResourceState::default())),
        }
    }
}

impl<T> Clone for Slice<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Slice<T> {
    /// A copy of the current state.
    pub fn snapshot(&self) -> ResourceState<T> {
        self.read().clone()
    }

    /// Reads the state without copying it.
    pub fn with<V>(&self, f: impl FnOnce(&ResourceState<T>) -> V) -> V {
        f(&self.read())
    }

    /// Starts a request.
    pub fn begin(&self, op: Operation) -> Ticket {
        self.write().begin(op)
    }

    /// Settles a request.
    pub fn finish(&self, ticket: Ticket, result: Result<Outcome<T>, Failure>) -> Transition {
        self.write().finish(ticket, result)
    }

    /// Forgets the last success or failure.
    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, ResourceState<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ResourceState<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// State of the whole application.
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Students.
    pub alunos: Slice<Aluno>,

    /// Professors.
    pub professores: Slice<Professor>,

    /// Contracts.
    pub contratos: Slice<Contrato>,

    /// Class sessions.
    pub aulas: Slice<Aula>,

    /// Weekly class-day rules.
    pub dias_aulas: Slice<DiaAula>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The slice of a resource.
    pub fn slice<R: Resource>(&self) -> &Slice<R> {
        R::slice(self)
    }
}

/// Issues requests for one resource and records their lifecycle in its slice.
///
/// Every call enters the loading state, awaits the API, and then applies either the
/// outcome or the failure, unless a newer call superseded it meanwhile.
#[derive(Debug)]
pub struct Dispatcher<'a, R, A> {
    slice: &'a Slice<R>,
    api: &'a A,
}

impl<'a, R: Resource, A: ResourceApi<R>> Dispatcher<'a, R, A> {
    /// Creates a dispatcher over a slice.
    pub fn new(slice: &'a Slice<R>, api: &'a A) -> Self {
        Self { slice, api }
    }

    /// A copy of the resource state.
    pub fn state(&self) -> ResourceState<R> {
        self.slice.snapshot()
    }

    /// Forgets the last success or failure.
    pub fn clear(&self) {
        self.slice.clear();
    }

    /// Lists a page.
    #[tracing::instrument(skip(self), fields(kind = %R::KIND))]
    pub async fn list(&self, query: &Query) -> Result<Page<Record<R>>, Failure> {
        let ticket = self.slice.begin(Operation::List);
        let result = ResourceApi::<R>::list(self.api, query).await;
        self.settle(ticket, result, |page| Outcome::Listed(page.clone()))
    }

    /// Fetches one entity.
    #[tracing::instrument(skip(self), fields(kind = %R::KIND))]
    pub async fn get(&self, id: i64) -> Result<Record<R>, Failure> {
        let ticket = self.slice.begin(Operation::Get);
        let result = ResourceApi::<R>::get(self.api, id).await;
        self.settle(ticket, result, |a| Outcome::Fetched(a.clone()))
    }

    /// Creates an entity.
    #[tracing::instrument(skip_all, fields(kind = %R::KIND))]
    pub async fn create(&self, data: &R) -> Result<Record<R>, Failure> {
        let ticket = self.slice.begin(Operation::Create);
        let result = ResourceApi::<R>::create(self.api, data).await;
        self.settle(ticket, result, |a| Outcome::Created(a.clone()))
    }

    /// Replaces an entity.
    #[tracing::instrument(skip(self, data), fields(kind = %R::KIND))]
    pub async fn update(&self, id: i64, data: &R) -> Result<Record<R>, Failure> {
        let ticket = self.slice.begin(Operation::Update);
        let result = ResourceApi::<R>::update(self.api, id, data).await;
        self.settle(ticket, result, |a| Outcome::Updated(a.clone()))
    }

    /// Deletes an entity.
    #[tracing::instrument(skip(self), fields(kind = %R::KIND))]
    pub async fn delete(&self, id: i64) -> Result<(), Failure> {
        let ticket = self.slice.begin(Operation::Delete);
        let result = ResourceApi::<R>::delete(self.api, id).await;
        self.settle(ticket, result, |_| Outcome::Deleted(id))
    }

    fn settle<V>(
        &self,
        ticket: Ticket,
        result: Result<V, Failure>,
        outcome: impl FnOnce(&V) -> Outcome<R>,
    ) -> Result<V, Failure> {
        let (transition, result) = match result {
            Ok(value) => (self.slice.finish(ticket, Ok(outcome(&value))), Ok(value)),
            Err(failure) => {
                tracing::warn!(kind = ?failure.kind, status = ?failure.status, "request failed: {failure}");
                (self.slice.finish(ticket, Err(failure.clone())), Err(failure))
            }
        };
        if transition == Transition::Stale {
            tracing::debug!("response superseded by a newer request");
        }
        result
    }
}

/// Counts of what a form submission persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitSummary {
    /// Sessions created.
    pub created: usize,

    /// Sessions updated.
    pub updated: usize,

    /// Sessions deleted.
    pub deleted: usize,
}

impl<A: AulaApi> Dispatcher<'_, Aula, A> {
    /// Lists the sessions of a student.
    #[tracing::instrument(skip(self))]
    pub async fn list_by_aluno(
        &self,
        aluno_id: i64,
        query: &Query,
    ) -> Result<Page<Record<Aula>>, Failure> {
        let ticket = self.slice.begin(Operation::ListByAluno);
        let result = self.api.list_by_aluno(aluno_id, query).await;
        self.settle(ticket, result, |page| Outcome::Listed(page.clone()))
    }

    /// Asks the backend to generate the sessions of a contract.
    #[tracing::instrument(skip_all)]
    pub async fn generate(&self, request: &GenerateRequest) -> Result<Vec<Aula>, Failure> {
        let ticket = self.slice.begin(Operation::Generate);
        let result = self.api.generate(request).await;
        self.settle(ticket, result, |aulas| Outcome::Generated(aulas.clone()))
    }

    /// Generates the sessions of a contract without contacting the backend.
    #[tracing::instrument(skip_all)]
    pub fn generate_local(&self, request: &GenerateRequest) -> Result<Vec<Aula>, Failure> {
        let ticket = self.slice.begin(Operation::Generate);
        let result = schedule::generate(request).map_err(Failure::from);
        self.settle(ticket, result, |aulas| Outcome::Generated(aulas.clone()))
    }

    /// Persists the pending changes of a session form.
    ///
    /// Removed sessions are deleted first, then new ones are created in date order and
    /// bound to their durable ids, then edited ones are updated. Stops at the first
    /// failure; what was persisted until then stays recorded in the form, so
    /// submitting again resumes where it stopped.
    pub async fn submit(&self, form: &mut AulaForm) -> Result<SubmitSummary, Failure> {
        let changes = form.changes();
        let mut summary = SubmitSummary::default();

        for remote in changes.delete {
            self.delete(remote).await?;
            form.forget_removed(remote);
            summary.deleted += 1;
        }

        for entry in changes.create {
            let record = self.create(&entry.aula).await?;
            form.bind(entry.id, record.id)?;
            summary.created += 1;
        }

        for (entry, remote) in changes.update {
            self.update(remote, &entry.aula).await?;
            form.mark_synced(entry.id);
            summary.updated += 1;
        }

        tracing::info!(?summary, "submitted session form");
        Ok(summary)
    }
}
