// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgAction, ArgMatches, arg, value_parser};
use diario_core::{DiaAula, DiaSemana, ResourceKind, TipoAula};
use jiff::civil::{Date, Time};

use crate::util::{OutputFormat, date_value, time_value};

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }

    pub fn yes() -> Arg {
        arg!(-y --yes "Do not ask for confirmation")
    }

    pub fn get_yes(matches: &ArgMatches) -> bool {
        matches.get_flag("yes")
    }
}

/// Arguments shared by the commands of one resource.
#[derive(Debug, Clone, Copy)]
pub struct ResourceArgs {
    kind: ResourceKind,
}

impl ResourceArgs {
    pub const fn new(kind: ResourceKind) -> Self {
        Self { kind }
    }

    pub fn id(self) -> Arg {
        let help = format!("The id of the {}", self.kind);
        arg!(id: <ID>).help(help).value_parser(value_parser!(i64))
    }

    pub fn get_id(matches: &ArgMatches) -> i64 {
        matches.get_one("id").copied().unwrap_or_default()
    }

    pub fn page() -> Arg {
        arg!(-p --page <PAGE> "Page to show, starting at 1")
            .value_parser(value_parser!(u32).range(1..))
            .default_value("1")
    }

    pub fn get_page(matches: &ArgMatches) -> u32 {
        matches.get_one("page").copied().unwrap_or(1)
    }

    pub fn search(self) -> Arg {
        let help = format!("Only show the {} matching this text", self.kind.path());
        arg!(-s --search <TEXT>).help(help)
    }

    pub fn get_search(matches: &ArgMatches) -> Option<String> {
        matches.get_one("search").cloned()
    }
}

/// Contact fields of students and professors.
#[derive(Debug, Clone, Copy)]
pub struct PersonArgs;

impl PersonArgs {
    pub fn nome(positional: bool) -> Arg {
        if positional {
            arg!(nome: <NOME> "Full name").required(false)
        } else {
            arg!(nome: -n --nome <NOME> "Full name")
        }
    }

    pub fn get_nome(matches: &ArgMatches) -> Option<String> {
        matches.get_one("nome").cloned()
    }

    pub fn email() -> Arg {
        arg!(--email <EMAIL> "E-mail address, empty to clear")
    }

    pub fn get_email(matches: &ArgMatches) -> Option<String> {
        matches.get_one("email").cloned()
    }

    pub fn telefone() -> Arg {
        arg!(--telefone <TELEFONE> "Phone number, empty to clear")
    }

    pub fn get_telefone(matches: &ArgMatches) -> Option<String> {
        matches.get_one("telefone").cloned()
    }

    pub fn responsavel() -> Arg {
        arg!(--responsavel <NOME> "Name of the guardian, empty to clear")
    }

    pub fn get_responsavel(matches: &ArgMatches) -> Option<String> {
        matches.get_one("responsavel").cloned()
    }
}

pub fn arg_observacao() -> Arg {
    arg!(--observacao <TEXT> "Free-text note, empty to clear")
}

pub fn get_observacao(matches: &ArgMatches) -> Option<String> {
    matches.get_one("observacao").cloned()
}

/// Turns a cleared text argument into `None`.
pub fn non_empty(s: String) -> Option<String> {
    (!s.trim().is_empty()).then_some(s)
}

#[derive(Debug, Clone, Copy)]
pub struct ContratoArgs;

impl ContratoArgs {
    pub fn aluno(required: bool) -> Arg {
        arg!(--aluno <ID> "The id of the student")
            .value_parser(value_parser!(i64))
            .required(required)
    }

    pub fn get_aluno(matches: &ArgMatches) -> Option<i64> {
        matches.get_one("aluno").copied()
    }

    pub fn professor() -> Arg {
        arg!(--professor <ID> "The id of the professor").value_parser(value_parser!(i64))
    }

    pub fn get_professor(matches: &ArgMatches) -> Option<i64> {
        matches.get_one("professor").copied()
    }

    pub fn inicio() -> Arg {
        arg!(--inicio <DATE> "First day of the contract, YYYY-MM-DD or DD/MM/YYYY")
            .value_parser(date_value)
    }

    pub fn get_inicio(matches: &ArgMatches) -> Option<Date> {
        matches.get_one("inicio").copied()
    }

    pub fn fim() -> Arg {
        arg!(--fim <DATE> "Last day of the contract, YYYY-MM-DD or DD/MM/YYYY")
            .value_parser(date_value)
    }

    pub fn get_fim(matches: &ArgMatches) -> Option<Date> {
        matches.get_one("fim").copied()
    }

    pub fn dias() -> Arg {
        arg!(--dia <RULE> "Weekly class day, e.g. SEGUNDA@09:00-10:00; repeat for more days")
            .value_parser(|s: &str| s.parse::<DiaAula>())
            .action(ArgAction::Append)
    }

    pub fn get_dias(matches: &ArgMatches) -> Option<Vec<DiaAula>> {
        matches
            .get_many::<DiaAula>("dia")
            .map(|a| a.cloned().collect())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AulaArgs;

impl AulaArgs {
    pub fn data() -> Arg {
        arg!(--data <DATE> "Day of the session, YYYY-MM-DD or DD/MM/YYYY")
            .value_parser(date_value)
    }

    pub fn get_data(matches: &ArgMatches) -> Option<Date> {
        matches.get_one("data").copied()
    }

    pub fn inicio() -> Arg {
        arg!(--inicio <TIME> "Start time, HH:MM").value_parser(time_value)
    }

    pub fn get_inicio(matches: &ArgMatches) -> Option<Time> {
        matches.get_one("inicio").copied()
    }

    pub fn fim() -> Arg {
        arg!(--fim <TIME> "End time, HH:MM").value_parser(time_value)
    }

    pub fn get_fim(matches: &ArgMatches) -> Option<Time> {
        matches.get_one("fim").copied()
    }

    pub fn tipo() -> Arg {
        arg!(--tipo <TIPO> "Kind of session").value_parser(value_parser!(TipoAula))
    }

    pub fn get_tipo(matches: &ArgMatches) -> Option<TipoAula> {
        matches.get_one("tipo").copied()
    }

    pub fn contrato() -> Arg {
        arg!(--contrato <ID> "The id of the contract").value_parser(value_parser!(i64))
    }

    pub fn get_contrato(matches: &ArgMatches) -> Option<i64> {
        matches.get_one("contrato").copied()
    }

    pub fn dia() -> Arg {
        arg!(--dia <DIA> "Day of the week").value_parser(value_parser!(DiaSemana))
    }

    pub fn get_dia(matches: &ArgMatches) -> Option<DiaSemana> {
        matches.get_one("dia").copied()
    }
}
