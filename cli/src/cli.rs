// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, io, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use diario_client::DiarioClient;
use diario_core::{APP_NAME, Aluno, Aula, Contrato, DiaAula, Diario, Professor};
use futures::{FutureExt, future::BoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_aluno::{CmdAlunoAulas, CmdAlunoEdit, CmdAlunoNew};
use crate::cmd_aula::{CmdAulaEdit, CmdAulaNew};
use crate::cmd_contrato::{CmdContratoAulas, CmdContratoEdit, CmdContratoNew};
use crate::cmd_dia_aula::{CmdDiaAulaEdit, CmdDiaAulaNew};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_professor::{CmdProfessorEdit, CmdProfessorNew};
use crate::cmd_resource::{CmdDelete, CmdGet, CmdList};
use crate::config::parse_config;
use crate::formatter::Printable;

/// Run the class diary command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                eprintln!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => eprintln!("{} {}", "Error:".red(), e),
    }
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

/// A resource group with listing, lookup and deletion.
fn resource<R: Printable>(name: &'static str, alias: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .alias(alias)
        .about(about)
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand(CmdList::<R>::command())
        .subcommand(CmdGet::<R>::command())
        .subcommand(CmdDelete::<R>::command())
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Class diary: students, professors, contracts and their sessions.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $DIARIO_CONFIG, then \
$XDG_CONFIG_HOME/diario/config.toml on Linux and MacOS, \
%APPDATA%/diario/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(
                resource::<Aluno>("aluno", "a", "Manage students")
                    .subcommand(CmdAlunoNew::command())
                    .subcommand(CmdAlunoEdit::command())
                    .subcommand(CmdAlunoAulas::command()),
            )
            .subcommand(
                resource::<Professor>("professor", "p", "Manage professors")
                    .subcommand(CmdProfessorNew::command())
                    .subcommand(CmdProfessorEdit::command()),
            )
            .subcommand(
                resource::<Contrato>("contrato", "c", "Manage contracts and their sessions")
                    .subcommand(CmdContratoNew::command())
                    .subcommand(CmdContratoEdit::command())
                    .subcommand(CmdContratoAulas::command()),
            )
            .subcommand(
                resource::<Aula>("aula", "s", "Manage class sessions")
                    .subcommand(CmdAulaNew::command())
                    .subcommand(CmdAulaEdit::command()),
            )
            .subcommand(
                resource::<DiaAula>("dia-aula", "d", "Manage weekly class days")
                    .subcommand(CmdDiaAulaNew::command())
                    .subcommand(CmdDiaAulaEdit::command()),
            )
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    #[rustfmt::skip]
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some(("aluno", matches)) => match matches.subcommand() {
                Some((CmdList::<Aluno>::NAME, m))   => AlunoList(CmdList::from(m)),
                Some((CmdGet::<Aluno>::NAME, m))    => AlunoGet(CmdGet::from(m)),
                Some((CmdDelete::<Aluno>::NAME, m)) => AlunoDelete(CmdDelete::from(m)),
                Some((CmdAlunoNew::NAME, m))        => AlunoNew(CmdAlunoNew::from(m)?),
                Some((CmdAlunoEdit::NAME, m))       => AlunoEdit(CmdAlunoEdit::from(m)),
                Some((CmdAlunoAulas::NAME, m))      => AlunoAulas(CmdAlunoAulas::from(m)),
                _ => unreachable!(),
            },
            Some(("professor", matches)) => match matches.subcommand() {
                Some((CmdList::<Professor>::NAME, m))   => ProfessorList(CmdList::from(m)),
                Some((CmdGet::<Professor>::NAME, m))    => ProfessorGet(CmdGet::from(m)),
                Some((CmdDelete::<Professor>::NAME, m)) => ProfessorDelete(CmdDelete::from(m)),
                Some((CmdProfessorNew::NAME, m))        => ProfessorNew(CmdProfessorNew::from(m)?),
                Some((CmdProfessorEdit::NAME, m))       => ProfessorEdit(CmdProfessorEdit::from(m)),
                _ => unreachable!(),
            },
            Some(("contrato", matches)) => match matches.subcommand() {
                Some((CmdList::<Contrato>::NAME, m))   => ContratoList(CmdList::from(m)),
                Some((CmdGet::<Contrato>::NAME, m))    => ContratoGet(CmdGet::from(m)),
                Some((CmdDelete::<Contrato>::NAME, m)) => ContratoDelete(CmdDelete::from(m)),
                Some((CmdContratoNew::NAME, m))        => ContratoNew(CmdContratoNew::from(m)?),
                Some((CmdContratoEdit::NAME, m))       => ContratoEdit(CmdContratoEdit::from(m)),
                Some((CmdContratoAulas::NAME, m))      => ContratoAulas(CmdContratoAulas::from(m)),
                _ => unreachable!(),
            },
            Some(("aula", matches)) => match matches.subcommand() {
                Some((CmdList::<Aula>::NAME, m))   => AulaList(CmdList::from(m)),
                Some((CmdGet::<Aula>::NAME, m))    => AulaGet(CmdGet::from(m)),
                Some((CmdDelete::<Aula>::NAME, m)) => AulaDelete(CmdDelete::from(m)),
                Some((CmdAulaNew::NAME, m))        => AulaNew(CmdAulaNew::from(m)?),
                Some((CmdAulaEdit::NAME, m))       => AulaEdit(CmdAulaEdit::from(m)),
                _ => unreachable!(),
            },
            Some(("dia-aula", matches)) => match matches.subcommand() {
                Some((CmdList::<DiaAula>::NAME, m))   => DiaAulaList(CmdList::from(m)),
                Some((CmdGet::<DiaAula>::NAME, m))    => DiaAulaGet(CmdGet::from(m)),
                Some((CmdDelete::<DiaAula>::NAME, m)) => DiaAulaDelete(CmdDelete::from(m)),
                Some((CmdDiaAulaNew::NAME, m))        => DiaAulaNew(CmdDiaAulaNew::from(m)?),
                Some((CmdDiaAulaEdit::NAME, m))       => DiaAulaEdit(CmdDiaAulaEdit::from(m)),
                _ => unreachable!(),
            },
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// List students
    AlunoList(CmdList<Aluno>),

    /// Show a student
    AlunoGet(CmdGet<Aluno>),

    /// Register a student
    AlunoNew(CmdAlunoNew),

    /// Edit a student
    AlunoEdit(CmdAlunoEdit),

    /// Delete a student
    AlunoDelete(CmdDelete<Aluno>),

    /// List the sessions of a student
    AlunoAulas(CmdAlunoAulas),

    /// List professors
    ProfessorList(CmdList<Professor>),

    /// Show a professor
    ProfessorGet(CmdGet<Professor>),

    /// Register a professor
    ProfessorNew(CmdProfessorNew),

    /// Edit a professor
    ProfessorEdit(CmdProfessorEdit),

    /// Delete a professor
    ProfessorDelete(CmdDelete<Professor>),

    /// List contracts
    ContratoList(CmdList<Contrato>),

    /// Show a contract
    ContratoGet(CmdGet<Contrato>),

    /// Create a contract
    ContratoNew(CmdContratoNew),

    /// Edit a contract
    ContratoEdit(CmdContratoEdit),

    /// Delete a contract
    ContratoDelete(CmdDelete<Contrato>),

    /// Generate and review the sessions of a contract
    ContratoAulas(CmdContratoAulas),

    /// List sessions
    AulaList(CmdList<Aula>),

    /// Show a session
    AulaGet(CmdGet<Aula>),

    /// Record a session
    AulaNew(CmdAulaNew),

    /// Edit a session
    AulaEdit(CmdAulaEdit),

    /// Delete a session
    AulaDelete(CmdDelete<Aula>),

    /// List weekly class days
    DiaAulaList(CmdList<DiaAula>),

    /// Show a weekly class day
    DiaAulaGet(CmdGet<DiaAula>),

    /// Add a weekly class day
    DiaAulaNew(CmdDiaAulaNew),

    /// Edit a weekly class day
    DiaAulaEdit(CmdDiaAulaEdit),

    /// Delete a weekly class day
    DiaAulaDelete(CmdDelete<DiaAula>),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            AlunoList(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            AlunoGet(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            AlunoNew(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            AlunoEdit(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            AlunoDelete(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            AlunoAulas(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            ProfessorList(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            ProfessorGet(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            ProfessorNew(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            ProfessorEdit(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            ProfessorDelete(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            ContratoList(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            ContratoGet(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            ContratoNew(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            ContratoEdit(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            ContratoDelete(a)  => Self::run_with(config, |x| a.run(x).boxed()).await,
            ContratoAulas(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            AulaList(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            AulaGet(a)         => Self::run_with(config, |x| a.run(x).boxed()).await,
            AulaNew(a)         => Self::run_with(config, |x| a.run(x).boxed()).await,
            AulaEdit(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            AulaDelete(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            DiaAulaList(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            DiaAulaGet(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            DiaAulaNew(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            DiaAulaEdit(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            DiaAulaDelete(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Diario<DiarioClient>) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let (core_config, api_config) = parse_config(config).await?;
        let client = DiarioClient::new(api_config)?;
        let diario = Diario::new(core_config, client);

        f(&diario).await
    }
}
