// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use diario_core::{Api, Aula, AulaPatch, Diario, Operation, Resource, ResourceKind, TipoAula};
use jiff::civil::{Date, Time};

use crate::arg::{
    AulaArgs, CommonArgs, ContratoArgs, ResourceArgs, arg_observacao, get_observacao, non_empty,
};
use crate::formatter::print_records;
use crate::prompt::prompt_aula;
use crate::ui::TerminalUi;
use crate::util::{OutputFormat, today};

#[derive(Debug, Clone)]
pub struct CmdAulaNew {
    pub data: Option<Date>,
    pub inicio: Option<Time>,
    pub fim: Option<Time>,
    pub tipo: Option<TipoAula>,
    pub contrato: Option<i64>,
    pub aluno: Option<i64>,
    pub observacao: Option<String>,

    pub tui: bool,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdAulaNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Record a session, interactively when no date is given")
            .arg(AulaArgs::data())
            .arg(AulaArgs::inicio())
            .arg(AulaArgs::fim())
            .arg(AulaArgs::tipo())
            .arg(AulaArgs::contrato())
            .arg(ContratoArgs::aluno(false))
            .arg(arg_observacao())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let data = AulaArgs::get_data(matches);
        let inicio = AulaArgs::get_inicio(matches);
        let fim = AulaArgs::get_fim(matches);

        let tui = data.is_none();
        if !tui && (inicio.is_none() || fim.is_none()) {
            return Err("--inicio and --fim are required for a new aula".into());
        }

        Ok(Self {
            data,
            inicio,
            fim,
            tipo: AulaArgs::get_tipo(matches),
            contrato: AulaArgs::get_contrato(matches),
            aluno: ContratoArgs::get_aluno(matches),
            observacao: get_observacao(matches),

            tui,
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        })
    }

    pub async fn run<A: Api>(self, diario: &Diario<A>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new aula...");
        let base = {
            let aula = diario.default_aula(
                self.data.unwrap_or_else(today),
                self.inicio.unwrap_or(Time::midnight()),
                self.fim.unwrap_or(Time::midnight()),
            );
            Aula {
                tipo: self.tipo.unwrap_or(aula.tipo),
                observacao: self.observacao.and_then(non_empty),
                aluno_id: self.aluno,
                ..aula.with_contrato(self.contrato)
            }
        };
        let aula = if self.tui {
            prompt_aula("New aula", base)?
        } else {
            base
        };

        let result = diario.aulas().create(&aula).await;
        let ui = TerminalUi::default();
        if let Some(record) = ui.settle(Aula::KIND, Operation::Create, result) {
            print_records(&[record], self.output_format, self.verbose);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdAulaEdit {
    pub id: i64,
    pub patch: AulaPatch,

    pub tui: bool,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdAulaEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a session, interactively when no field is given")
            .arg(ResourceArgs::new(ResourceKind::Aula).id())
            .arg(AulaArgs::data())
            .arg(AulaArgs::inicio())
            .arg(AulaArgs::fim())
            .arg(AulaArgs::tipo())
            .arg(arg_observacao())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let patch = AulaPatch {
            data: AulaArgs::get_data(matches),
            hora_inicio: AulaArgs::get_inicio(matches),
            hora_fim: AulaArgs::get_fim(matches),
            tipo: AulaArgs::get_tipo(matches),
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
        tracing::debug!(?self, "editing aula...");
        let ui = TerminalUi::default();
        let aulas = diario.aulas();
        let result = aulas.get(self.id).await;
        let Some(mut record) = ui.settle(Aula::KIND, Operation::Get, result) else {
            return Ok(());
        };

        let aula = if self.tui {
            prompt_aula("Edit aula", record.data)?
        } else {
            self.patch.apply_to(&mut record.data);
            record.data
        };

        let result = aulas.update(self.id, &aula).await;
        if let Some(record) = ui.settle(Aula::KIND, Operation::Update, result) {
            print_records(&[record], self.output_format, self.verbose);
        }
        Ok(())
    }
}
