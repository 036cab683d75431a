// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use diario_core::{Api, DiaAula, DiaSemana, Diario, Operation, Resource, ResourceKind};
use jiff::civil::Time;

use crate::arg::{AulaArgs, CommonArgs, ResourceArgs};
use crate::formatter::print_records;
use crate::prompt::prompt_dia_aula;
use crate::ui::TerminalUi;
use crate::util::OutputFormat;

/// Fields of a weekly rule given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiaAulaFields {
    pub dia: Option<DiaSemana>,
    pub inicio: Option<Time>,
    pub fim: Option<Time>,
    pub contrato: Option<i64>,
}

impl DiaAulaFields {
    fn from(matches: &ArgMatches) -> Self {
        Self {
            dia: AulaArgs::get_dia(matches),
            inicio: AulaArgs::get_inicio(matches),
            fim: AulaArgs::get_fim(matches),
            contrato: AulaArgs::get_contrato(matches),
        }
    }

    fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn apply_to(&self, rule: &mut DiaAula) {
        if let Some(dia) = self.dia {
            rule.dia = dia;
        }
        if let Some(inicio) = self.inicio {
            rule.hora_inicio = inicio;
        }
        if let Some(fim) = self.fim {
            rule.hora_fim = fim;
        }
        if let Some(contrato) = self.contrato {
            rule.contrato_id = Some(contrato);
        }
    }
}

fn command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(AulaArgs::dia())
        .arg(AulaArgs::inicio())
        .arg(AulaArgs::fim())
        .arg(AulaArgs::contrato())
        .arg(CommonArgs::output_format())
        .arg(CommonArgs::verbose())
}

#[derive(Debug, Clone)]
pub struct CmdDiaAulaNew {
    pub fields: DiaAulaFields,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdDiaAulaNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        command(Self::NAME, "Add a weekly class day, interactively when no field is given")
            .alias("add")
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let fields = DiaAulaFields::from(matches);
        if !fields.is_empty() && (fields.dia.is_none() || fields.inicio.is_none() || fields.fim.is_none())
        {
            return Err("--dia, --inicio and --fim are required for a new dia de aula".into());
        }

        Ok(Self {
            fields,
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        })
    }

    pub async fn run<A: Api>(self, diario: &Diario<A>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new dia de aula...");
        let rule = match (self.fields.dia, self.fields.inicio, self.fields.fim) {
            (Some(dia), Some(inicio), Some(fim)) => DiaAula {
                contrato_id: self.fields.contrato,
                ..DiaAula::new(dia, inicio, fim)
            },
            _ => prompt_dia_aula(None)?,
        };

        let result = diario.dias_aulas().create(&rule).await;
        let ui = TerminalUi::default();
        if let Some(record) = ui.settle(DiaAula::KIND, Operation::Create, result) {
            print_records(&[record], self.output_format, self.verbose);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdDiaAulaEdit {
    pub id: i64,
    pub fields: DiaAulaFields,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdDiaAulaEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        command(Self::NAME, "Edit a weekly class day, interactively when no field is given")
            .arg(ResourceArgs::new(ResourceKind::DiaAula).id())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: ResourceArgs::get_id(matches),
            fields: DiaAulaFields::from(matches),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run<A: Api>(self, diario: &Diario<A>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing dia de aula...");
        let ui = TerminalUi::default();
        let dias_aulas = diario.dias_aulas();
        let result = dias_aulas.get(self.id).await;
        let Some(mut record) = ui.settle(DiaAula::KIND, Operation::Get, result) else {
            return Ok(());
        };

        let rule = if self.fields.is_empty() {
            prompt_dia_aula(Some(&record.data))?
        } else {
            self.fields.apply_to(&mut record.data);
            record.data
        };

        let result = dias_aulas.update(self.id, &rule).await;
        if let Some(record) = ui.settle(DiaAula::KIND, Operation::Update, result) {
            print_records(&[record], self.output_format, self.verbose);
        }
        Ok(())
    }
}
