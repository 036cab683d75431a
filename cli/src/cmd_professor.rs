// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use diario_core::{Api, Diario, Operation, Professor, ProfessorPatch, Resource, ResourceKind};

use crate::arg::{CommonArgs, PersonArgs, ResourceArgs, non_empty};
use crate::formatter::print_records;
use crate::prompt::prompt_professor;
use crate::ui::TerminalUi;
use crate::util::OutputFormat;

#[derive(Debug, Clone)]
pub struct CmdProfessorNew {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,

    pub tui: bool,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdProfessorNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Register a new professor, interactively when no field is given")
            .arg(PersonArgs::nome(true))
            .arg(PersonArgs::email())
            .arg(PersonArgs::telefone())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let email = PersonArgs::get_email(matches);
        let telefone = PersonArgs::get_telefone(matches);
        let nome = PersonArgs::get_nome(matches);
        if nome.is_none() && (email.is_some() || telefone.is_some()) {
            return Err("Nome is required for a new professor".into());
        }

        Ok(Self {
            tui: nome.is_none(),
            nome,
            email,
            telefone,
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        })
    }

    pub async fn run<A: Api>(self, diario: &Diario<A>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new professor...");
        let professor = if self.tui {
            prompt_professor(None)?
        } else {
            Professor {
                nome: self.nome.unwrap_or_default(),
                email: self.email.and_then(non_empty),
                telefone: self.telefone.and_then(non_empty),
            }
        };

        let result = diario.professores().create(&professor).await;
        let ui = TerminalUi::default();
        if let Some(record) = ui.settle(Professor::KIND, Operation::Create, result) {
            print_records(&[record], self.output_format, self.verbose);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdProfessorEdit {
    pub id: i64,
    pub patch: ProfessorPatch,

    pub tui: bool,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdProfessorEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a professor, interactively when no field is given")
            .arg(ResourceArgs::new(ResourceKind::Professor).id())
            .arg(PersonArgs::nome(false))
            .arg(PersonArgs::email())
            .arg(PersonArgs::telefone())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let patch = ProfessorPatch {
            nome: PersonArgs::get_nome(matches),
            email: PersonArgs::get_email(matches).map(non_empty),
            telefone: PersonArgs::get_telefone(matches).map(non_empty),
        };

        Self {
            id: ResourceArgs::get_id(matches),
            tui: patch.is_empty(),
            patch,
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run<A: Api>(self, diario: &Diario<A>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing professor...");
        let ui = TerminalUi::default();
        let professores = diario.professores();
        let result = professores.get(self.id).await;
        let Some(mut record) = ui.settle(Professor::KIND, Operation::Get, result) else {
            return Ok(());
        };

        let professor = if self.tui {
            prompt_professor(Some(&record.data))?
        } else {
            self.patch.apply_to(&mut record.data);
            record.data
        };

        let result = professores.update(self.id, &professor).await;
        if let Some(record) = ui.settle(Professor::KIND, Operation::Update, result) {
            print_records(&[record], self.output_format, self.verbose);
        }
        Ok(())
    }
}
