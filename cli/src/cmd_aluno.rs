// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use diario_core::{Aluno, AlunoPatch, Api, Aula, Diario, Operation, Resource, ResourceKind};

use crate::arg::{CommonArgs, PersonArgs, ResourceArgs, arg_observacao, get_observacao, non_empty};
use crate::cmd_resource::print_page;
use crate::formatter::print_records;
use crate::prompt::prompt_aluno;
use crate::ui::TerminalUi;
use crate::util::OutputFormat;

#[derive(Debug, Clone)]
pub struct CmdAlunoNew {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub responsavel: Option<String>,
    pub observacao: Option<String>,

    pub tui: bool,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdAlunoNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Register a new student, interactively when no field is given")
            .arg(PersonArgs::nome(true))
            .arg(PersonArgs::email())
            .arg(PersonArgs::telefone())
            .arg(PersonArgs::responsavel())
            .arg(arg_observacao())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let email = PersonArgs::get_email(matches);
        let telefone = PersonArgs::get_telefone(matches);
        let responsavel = PersonArgs::get_responsavel(matches);
        let observacao = get_observacao(matches);

        let nome = match PersonArgs::get_nome(matches) {
            Some(nome) => Some(nome),
            None if email.is_none()
                && telefone.is_none()
                && responsavel.is_none()
                && observacao.is_none() =>
            {
                None
            }
            None => return Err("Nome is required for a new aluno".into()),
        };

        let tui = nome.is_none();
        Ok(Self {
            nome,
            email,
            telefone,
            responsavel,
            observacao,

            tui,
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        })
    }

    pub async fn run<A: Api>(self, diario: &Diario<A>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new aluno...");
        let aluno = if self.tui {
            prompt_aluno(None)?
        } else {
            Aluno {
                nome: self.nome.unwrap_or_default(),
                email: self.email.and_then(non_empty),
                telefone: self.telefone.and_then(non_empty),
                responsavel: self.responsavel.and_then(non_empty),
                observacao: self.observacao.and_then(non_empty),
            }
        };

        let result = diario.alunos().create(&aluno).await;
        if let Some(record) = TerminalUi::default().settle(Aluno::KIND, Operation::Create, result) {
            print_records(&[record], self.output_format, self.verbose);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdAlunoEdit {
    pub id: i64,
    pub patch: AlunoPatch,

    pub tui: bool,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdAlunoEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a student, interactively when no field is given")
            .arg(ResourceArgs::new(ResourceKind::Aluno).id())
            .arg(PersonArgs::nome(false))
            .arg(PersonArgs::email())
            .arg(PersonArgs::telefone())
            .arg(PersonArgs::responsavel())
            .arg(arg_observacao())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let patch = AlunoPatch {
            nome: PersonArgs::get_nome(matches),
            email: PersonArgs::get_email(matches).map(non_empty),
            telefone: PersonArgs::get_telefone(matches).map(non_empty),
            responsavel: PersonArgs::get_responsavel(matches).map(non_empty),
            observacao: get_observacao(matches).map(non_empty),
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
        tracing::debug!(?self, "editing aluno...");
        let ui = TerminalUi::default();
        let alunos = diario.alunos();
        let Some(mut record) = ui.settle(Aluno::KIND, Operation::Get, alunos.get(self.id).await)
        else {
            return Ok(());
        };

        let aluno = if self.tui {
            prompt_aluno(Some(&record.data))?
        } else {
            self.patch.apply_to(&mut record.data);
            record.data
        };

        let result = alunos.update(self.id, &aluno).await;
        if let Some(record) = ui.settle(Aluno::KIND, Operation::Update, result) {
            print_records(&[record], self.output_format, self.verbose);
        }
        Ok(())
    }
}

/// Lists the sessions of a student.
#[derive(Debug, Clone)]
pub struct CmdAlunoAulas {
    pub id: i64,
    pub page: u32,
    pub search: Option<String>,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdAlunoAulas {
    pub const NAME: &str = "aulas";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List the sessions of a student")
            .arg(ResourceArgs::new(ResourceKind::Aluno).id())
            .arg(ResourceArgs::page())
            .arg(ResourceArgs::new(ResourceKind::Aula).search())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: ResourceArgs::get_id(matches),
            page: ResourceArgs::get_page(matches),
            search: ResourceArgs::get_search(matches),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run<A: Api>(self, diario: &Diario<A>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing aulas of aluno...");
        let query = diario.query(self.page, self.search);
        let result = diario.aulas().list_by_aluno(self.id, &query).await;
        if let Some(page) = TerminalUi::default().settle(Aula::KIND, Operation::ListByAluno, result)
        {
            print_page(&page, self.page, self.output_format, self.verbose);
        }
        Ok(())
    }
}
