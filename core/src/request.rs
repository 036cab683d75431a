// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle of the requests issued against one resource.

use std::fmt;

use crate::{Failure, Page, Record};

/// An operation dispatched against a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List a page of entities.
    List,

    /// List the sessions of a student.
    ListByAluno,

    /// Fetch one entity.
    Get,

    /// Create an entity.
    Create,

    /// Update an entity.
    Update,

    /// Delete an entity.
    Delete,

    /// Generate the sessions of a contract.
    Generate,
}

impl Operation {
    /// Whether a success should navigate back to the listing.
    pub const fn is_mutation(self) -> bool {
        matches!(self, Operation::Create | Operation::Update | Operation::Delete)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::List => "list",
            Operation::ListByAluno => "list by aluno",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Generate => "generate",
        })
    }
}

/// Sequence number of a dispatched request, increasing per resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// State of the latest request issued against a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    /// Nothing dispatched, or cleared.
    #[default]
    Idle,

    /// Waiting for the response of `ticket`.
    Loading {
        /// The operation in flight.
        op: Operation,
        /// The only ticket whose response will be applied.
        ticket: Ticket,
    },

    /// The operation succeeded.
    Success {
        /// The operation that succeeded.
        op: Operation,
        /// Message returned by the backend, if any.
        message: Option<String>,
    },

    /// The operation failed; the resource data was left untouched.
    Failed {
        /// The operation that failed.
        op: Operation,
        /// What went wrong.
        failure: Failure,
    },
}

impl RequestState {
    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }

    /// The operation of the latest request.
    pub fn op(&self) -> Option<Operation> {
        match self {
            RequestState::Idle => None,
            RequestState::Loading { op, .. }
            | RequestState::Success { op, .. }
            | RequestState::Failed { op, .. } => Some(*op),
        }
    }

    /// Whether `op` is the operation that succeeded.
    pub fn succeeded(&self, op: Operation) -> bool {
        matches!(self, RequestState::Success { op: a, .. } if *a == op)
    }

    /// The failure of `op`, if it is the operation that failed.
    pub fn failed(&self, op: Operation) -> Option<&Failure> {
        match self {
            RequestState::Failed { op: a, failure } if *a == op => Some(failure),
            _ => None,
        }
    }

    /// The failure of the latest request, whatever its operation.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            RequestState::Failed { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

/// Result of a successful operation, applied to the resource data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// A page replaced the listing.
    Listed(Page<Record<T>>),

    /// One entity was fetched.
    Fetched(Record<T>),

    /// An entity was created.
    Created(Record<T>),

    /// An entity was updated.
    Updated(Record<T>),

    /// The entity with this id was deleted.
    Deleted(i64),

    /// Unsaved entities were generated.
    Generated(Vec<T>),
}

/// Whether a response was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The response belonged to the request in flight.
    Applied,

    /// A newer request superseded it; nothing changed.
    Stale,
}

/// Data and request state of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceState<T> {
    list: Vec<Record<T>>,
    current: Option<Record<T>>,
    count: u64,
    generated: Vec<T>,
    request: RequestState,
    issued: u64,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            current: None,
            count: 0,
            generated: Vec::new(),
            request: RequestState::Idle,
            issued: 0,
        }
    }
}

impl<T> ResourceState<T> {
    /// The entities of the latest listing, with later mutations applied.
    pub fn list(&self) -> &[Record<T>] {
        &self.list
    }

    /// The entity last fetched, created or updated.
    pub fn current(&self) -> Option<&Record<T>> {
        self.current.as_ref()
    }

    /// Total number of entities reported by the backend.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Entities produced by the latest generation.
    pub fn generated(&self) -> &[T] {
        &self.generated
    }

    /// State of the latest request.
    pub fn request(&self) -> &RequestState {
        &self.request
    }
}

impl<T: Clone> ResourceState<T> {
    /// Starts a request, superseding any request still in flight.
    pub fn begin(&mut self, op: Operation) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.request = RequestState::Loading { op, ticket };
        ticket
    }

    /// Settles the request identified by `ticket`.
    ///
    /// Responses of superseded requests are ignored.
    pub fn finish(&mut self, ticket: Ticket, result: Result<Outcome<T>, Failure>) -> Transition {
        let op = match self.request {
            RequestState::Loading { op, ticket: current } if current == ticket => op,
            _ => {
                tracing::debug!(?ticket, "ignoring response of a superseded request");
                return Transition::Stale;
            }
        };

        self.request = match result {
            Ok(outcome) => {
                let message = self.apply(outcome);
                RequestState::Success { op, message }
            }
            Err(failure) => RequestState::Failed { op, failure },
        };
        Transition::Applied
    }

    /// Returns to idle, forgetting the last success or failure.
    pub fn clear(&mut self) {
        self.request = RequestState::Idle;
    }

    fn apply(&mut self, outcome: Outcome<T>) -> Option<String> {
        match outcome {
            Outcome::Listed(page) => {
                self.list = page.data;
                self.count = page.count;
                return page.message;
            }
            Outcome::Fetched(record) => self.current = Some(record),
            Outcome::Created(record) => {
                self.list.push(record.clone());
                self.count += 1;
                self.current = Some(record);
            }
            Outcome::Updated(record) => {
                if let Some(a) = self.list.iter_mut().find(|a| a.id == record.id) {
                    *a = record.clone();
                }
                self.current = Some(record);
            }
            Outcome::Deleted(id) => {
                self.list.retain(|a| a.id != id);
                self.count = self.count.saturating_sub(1);
                if self.current.as_ref().is_some_and(|a| a.id == id) {
                    self.current = None;
                }
            }
            Outcome::Generated(data) => self.generated = data,
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FailureKind, FieldErrors};

    fn loaded(ids: &[i64]) -> ResourceState<String> {
        let mut state = ResourceState::default();
        let ticket = state.begin(Operation::List);
        let page = Page::from_vec(ids.iter().map(|&id| Record::new(id, format!("#{id}"))).collect());
        assert_eq!(state.finish(ticket, Ok(Outcome::Listed(page))), Transition::Applied);
        state
    }

    #[test]
    fn begin_enters_loading_and_clears_failure() {
        let mut state = loaded(&[1]);
        let ticket = state.begin(Operation::Get);
        state.finish(ticket, Err(Failure::new(FailureKind::NotFound, "not found")));
        assert!(state.request().failed(Operation::Get).is_some());

        state.begin(Operation::Get);
        assert!(state.request().is_loading());
        assert_eq!(state.request().op(), Some(Operation::Get));
        assert!(state.request().failure().is_none());
    }

    #[test]
    fn delete_removes_entity_and_decrements_count() {
        let mut state = loaded(&[3, 5, 8]);
        let ticket = state.begin(Operation::Get);
        state.finish(ticket, Ok(Outcome::Fetched(Record::new(5, "#5".to_string()))));

        let ticket = state.begin(Operation::Delete);
        state.finish(ticket, Ok(Outcome::Deleted(5)));

        assert_eq!(state.list().len(), 2);
        assert!(state.list().iter().all(|a| a.id != 5));
        assert_eq!(state.count(), 2);
        assert!(state.current().is_none());
        assert!(state.request().succeeded(Operation::Delete));
    }

    #[test]
    fn delete_keeps_unrelated_current() {
        let mut state = loaded(&[3, 5]);
        let ticket = state.begin(Operation::Get);
        state.finish(ticket, Ok(Outcome::Fetched(Record::new(3, "#3".to_string()))));
        let ticket = state.begin(Operation::Delete);
        state.finish(ticket, Ok(Outcome::Deleted(5)));
        assert_eq!(state.current().map(|a| a.id), Some(3));
    }

    #[test]
    fn failed_create_leaves_list_unchanged() {
        let mut state = loaded(&[1, 2]);
        let mut errors = FieldErrors::new();
        errors.insert("nome".to_string(), "required".to_string());

        let ticket = state.begin(Operation::Create);
        state.finish(ticket, Err(Failure::validation("Invalid data", errors.clone())));

        let failure = state.request().failed(Operation::Create).unwrap();
        assert_eq!(failure.errors, errors);
        assert_eq!(state.list().len(), 2);
        assert_eq!(state.count(), 2);
    }

    #[test]
    fn create_appends_and_update_replaces() {
        let mut state = loaded(&[1]);
        let ticket = state.begin(Operation::Create);
        state.finish(ticket, Ok(Outcome::Created(Record::new(2, "new".to_string()))));
        assert_eq!(state.count(), 2);
        assert_eq!(state.current().map(|a| a.id), Some(2));

        let ticket = state.begin(Operation::Update);
        state.finish(ticket, Ok(Outcome::Updated(Record::new(1, "changed".to_string()))));
        assert_eq!(state.list()[0].data, "changed");
        assert_eq!(state.list().len(), 2);
        assert_eq!(state.current().map(|a| a.id), Some(1));
    }

    #[test]
    fn superseded_response_is_ignored() {
        let mut state = loaded(&[1]);
        let older = state.begin(Operation::List);
        let newer = state.begin(Operation::List);

        let fresh = Page::from_vec(vec![Record::new(9, "#9".to_string())]);
        assert_eq!(state.finish(newer, Ok(Outcome::Listed(fresh))), Transition::Applied);

        let stale = Page::from_vec(vec![Record::new(4, "#4".to_string())]);
        assert_eq!(state.finish(older, Ok(Outcome::Listed(stale))), Transition::Stale);
        assert_eq!(state.list()[0].id, 9);

        let failure = Failure::new(FailureKind::Network, "timeout");
        assert_eq!(state.finish(older, Err(failure)), Transition::Stale);
        assert!(state.request().succeeded(Operation::List));
    }

    #[test]
    fn listing_message_is_kept() {
        let mut state = ResourceState::<String>::default();
        let ticket = state.begin(Operation::List);
        let mut page = Page::from_vec(Vec::new());
        page.message = Some("Nenhum aluno".to_string());
        state.finish(ticket, Ok(Outcome::Listed(page)));
        assert_eq!(
            state.request(),
            &RequestState::Success {
                op: Operation::List,
                message: Some("Nenhum aluno".to_string())
            }
        );

        state.clear();
        assert_eq!(state.request(), &RequestState::Idle);
    }
}
