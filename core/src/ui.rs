// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Collaborators the front end provides, and the reactions to request results built
//! on them.

use std::fmt;

use crate::request::Operation;
use crate::{Failure, FailureKind, ResourceKind};

/// Route of the login screen.
pub const LOGIN_ROUTE: &str = "/login";

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyKind {
    /// An operation succeeded.
    Success,

    /// Something the user should know.
    Info,

    /// Something went wrong but nothing was lost.
    Warning,

    /// An operation failed.
    Error,
}

impl fmt::Display for NotifyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotifyKind::Success => "success",
            NotifyKind::Info => "info",
            NotifyKind::Warning => "warning",
            NotifyKind::Error => "error",
        })
    }
}

/// Asks the user a yes/no question.
pub trait Confirm {
    /// Whether the user accepted.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Shows a message to the user.
pub trait Notify {
    /// Shows `message` with the given severity.
    fn notify(&self, kind: NotifyKind, message: &str);
}

/// Moves to another screen.
pub trait Navigate {
    /// Goes to `path`.
    fn push(&self, path: &str);
}

/// The authenticated session.
pub trait Session {
    /// Drops the credentials.
    fn logout(&self);
}

/// All the collaborators together.
pub trait Ui: Confirm + Notify + Navigate + Session {}

impl<T: Confirm + Notify + Navigate + Session> Ui for T {}

/// Asks before deleting an entity.
pub fn confirm_delete(ui: &impl Confirm, kind: ResourceKind, id: i64) -> bool {
    let confirmed = ui.confirm(&format!("Delete {kind} #{id}? This cannot be undone."));
    if !confirmed {
        tracing::debug!(%kind, id, "deletion cancelled");
    }
    confirmed
}

/// Reacts to the result of an operation.
///
/// Successful mutations are notified and navigate back to the listing; failures are
/// reported, and an expired session logs the user out.
pub fn report<V>(ui: &impl Ui, kind: ResourceKind, op: Operation, result: &Result<V, Failure>) {
    match result {
        Ok(_) => report_success(ui, kind, op),
        Err(failure) => report_failure(ui, failure),
    }
}

/// Notifies a successful operation.
pub fn report_success(ui: &(impl Notify + Navigate), kind: ResourceKind, op: Operation) {
    let verb = match op {
        Operation::Create => "created",
        Operation::Update => "updated",
        Operation::Delete => "deleted",
        _ => return,
    };
    ui.notify(NotifyKind::Success, &format!("{} {verb}", capitalize(kind.label())));
    ui.push(&kind.route());
}

/// Notifies a failed operation.
pub fn report_failure(ui: &(impl Notify + Navigate + Session), failure: &Failure) {
    match failure.kind {
        FailureKind::Unauthorized => {
            ui.notify(NotifyKind::Error, &failure.message);
            ui.logout();
            ui.push(LOGIN_ROUTE);
        }
        FailureKind::NotFound => ui.notify(NotifyKind::Warning, &failure.message),
        FailureKind::Validation => {
            ui.notify(NotifyKind::Error, &failure.message);
            for (field, message) in &failure.errors {
                ui.notify(NotifyKind::Error, &format!("{field}: {message}"));
            }
        }
        FailureKind::Network | FailureKind::Other => {
            ui.notify(NotifyKind::Error, &failure.message);
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::FieldErrors;

    #[derive(Default)]
    struct Recorder {
        answer: bool,
        events: RefCell<Vec<String>>,
    }

    impl Confirm for Recorder {
        fn confirm(&self, prompt: &str) -> bool {
            self.events.borrow_mut().push(format!("confirm {prompt}"));
            self.answer
        }
    }

    impl Notify for Recorder {
        fn notify(&self, kind: NotifyKind, message: &str) {
            self.events.borrow_mut().push(format!("{kind} {message}"));
        }
    }

    impl Navigate for Recorder {
        fn push(&self, path: &str) {
            self.events.borrow_mut().push(format!("push {path}"));
        }
    }

    impl Session for Recorder {
        fn logout(&self) {
            self.events.borrow_mut().push("logout".to_string());
        }
    }

    #[test]
    fn mutation_success_navigates_to_listing() {
        let ui = Recorder::default();
        report(&ui, ResourceKind::Aluno, Operation::Create, &Ok::<_, Failure>(()));
        assert_eq!(
            ui.events.into_inner(),
            vec!["success Aluno created", "push /alunos"]
        );
    }

    #[test]
    fn read_success_is_silent() {
        let ui = Recorder::default();
        report(&ui, ResourceKind::Aula, Operation::List, &Ok::<_, Failure>(()));
        assert!(ui.events.into_inner().is_empty());
    }

    #[test]
    fn unauthorized_logs_out() {
        let ui = Recorder::default();
        let failure = Failure::new(FailureKind::Unauthorized, "Session expired");
        report(&ui, ResourceKind::Contrato, Operation::Get, &Err::<(), _>(failure));
        assert_eq!(
            ui.events.into_inner(),
            vec!["error Session expired", "logout", "push /login"]
        );
    }

    #[test]
    fn validation_lists_field_errors() {
        let ui = Recorder::default();
        let mut errors = FieldErrors::new();
        errors.insert("nome".to_string(), "required".to_string());
        let failure = Failure::validation("Invalid data", errors);
        report_failure(&ui, &failure);
        assert_eq!(
            ui.events.into_inner(),
            vec!["error Invalid data", "error nome: required"]
        );
    }

    #[test]
    fn not_found_is_a_warning() {
        let ui = Recorder::default();
        report_failure(&ui, &Failure::new(FailureKind::NotFound, "Aluno not found"));
        assert_eq!(ui.events.into_inner(), vec!["warning Aluno not found"]);
    }

    #[test]
    fn delete_needs_confirmation() {
        let ui = Recorder::default();
        assert!(!confirm_delete(&ui, ResourceKind::Professor, 3));

        let ui = Recorder {
            answer: true,
            ..Default::default()
        };
        assert!(confirm_delete(&ui, ResourceKind::Professor, 3));
        assert_eq!(
            ui.events.into_inner(),
            vec!["confirm Delete professor #3? This cannot be undone."]
        );
    }
}
