// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use colored::Colorize;
use diario_core::ui::{self, Confirm, Navigate, NotifyKind, Notify, Session};
use diario_core::{Failure, Operation, ResourceKind};

/// Terminal rendition of the user interface collaborators.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalUi {
    /// Answer yes to every confirmation.
    pub assume_yes: bool,
}

impl TerminalUi {
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    /// Report the result of an operation, handing back the value on success.
    pub fn settle<V>(
        &self,
        kind: ResourceKind,
        op: Operation,
        result: Result<V, Failure>,
    ) -> Option<V> {
        ui::report(self, kind, op, &result);
        result.ok()
    }
}

impl Confirm for TerminalUi {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        match cliclack::confirm(prompt).initial_value(false).interact() {
            Ok(answer) => answer,
            Err(e) => {
                tracing::debug!(error = %e, "confirmation aborted");
                false
            }
        }
    }
}

impl Notify for TerminalUi {
    fn notify(&self, kind: NotifyKind, message: &str) {
        let line = render(kind, message);
        if to_stderr(kind) {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

/// Warnings and errors are written to stderr, everything else to stdout.
const fn to_stderr(kind: NotifyKind) -> bool {
    matches!(kind, NotifyKind::Warning | NotifyKind::Error)
}

fn render(kind: NotifyKind, message: &str) -> String {
    match kind {
        NotifyKind::Success => format!("{} {message}", "✔".green()),
        NotifyKind::Info => format!("{} {message}", "ℹ".blue()),
        NotifyKind::Warning => format!("{} {message}", "Warning:".yellow()),
        NotifyKind::Error => format!("{} {message}", "Error:".red()),
    }
}

impl Navigate for TerminalUi {
    fn push(&self, path: &str) {
        tracing::debug!(path, "navigate");
    }
}

impl Session for TerminalUi {
    fn logout(&self) {
        tracing::info!("session expired");
        eprintln!(
            "{} update the credentials in the [api.auth] section of your config",
            "Hint:".cyan()
        );
    }
}
