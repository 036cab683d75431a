// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use diario_core::ui::{self, Confirm, Notify, NotifyKind};
use diario_core::{
    Api, Aula, AulaForm, AulaPatch, Contrato, DiaAula, Diario, MAX_PAGE_SIZE, Operation, Query,
    Record, Resource, ResourceKind, SubmitSummary,
};
use jiff::civil::{Date, Time};

use crate::arg::{
    CommonArgs, ContratoArgs, ResourceArgs, arg_observacao, get_observacao, non_empty,
};
use crate::formatter::{AulaColumn, FormRow, Formatter, print_records};
use crate::prompt::{FormAction, prompt_aula, prompt_contrato, prompt_entry, prompt_form_action};
use crate::ui::TerminalUi;
use crate::util::{OutputFormat, today};

#[derive(Debug, Clone)]
pub struct CmdContratoNew {
    pub aluno: Option<i64>,
    pub professor: Option<i64>,
    pub inicio: Option<Date>,
    pub fim: Option<Date>,
    pub dias: Option<Vec<DiaAula>>,
    pub observacao: Option<String>,

    pub tui: bool,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdContratoNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Create a new contract, interactively when no field is given")
            .arg(ContratoArgs::aluno(false))
            .arg(ContratoArgs::professor())
            .arg(ContratoArgs::inicio())
            .arg(ContratoArgs::fim())
            .arg(ContratoArgs::dias())
            .arg(arg_observacao())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let aluno = ContratoArgs::get_aluno(matches);
        let professor = ContratoArgs::get_professor(matches);
        let inicio = ContratoArgs::get_inicio(matches);
        let fim = ContratoArgs::get_fim(matches);
        let dias = ContratoArgs::get_dias(matches);
        let observacao = get_observacao(matches);

        let tui = aluno.is_none()
            && professor.is_none()
            && inicio.is_none()
            && fim.is_none()
            && dias.is_none()
            && observacao.is_none();
        if !tui && (aluno.is_none() || inicio.is_none() || fim.is_none()) {
            return Err("--aluno, --inicio and --fim are required for a new contrato".into());
        }

        Ok(Self {
            aluno,
            professor,
            inicio,
            fim,
            dias,
            observacao,

            tui,
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        })
    }

    pub async fn run<A: Api>(self, diario: &Diario<A>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new contrato...");
        let contrato = match (self.tui, self.aluno, self.inicio, self.fim) {
            (false, Some(aluno_id), Some(data_inicio), Some(data_fim)) => Contrato {
                aluno_id,
                professor_id: self.professor,
                data_inicio,
                data_fim,
                dias_aulas: self.dias.unwrap_or_default(),
                observacao: self.observacao.and_then(non_empty),
            },
            _ => prompt_contrato(None)?,
        };

        let result = diario.contratos().create(&contrato).await;
        let ui = TerminalUi::default();
        if let Some(record) = ui.settle(Contrato::KIND, Operation::Create, result) {
            print_records(&[record], self.output_format, self.verbose);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdContratoEdit {
    pub id: i64,
    pub aluno: Option<i64>,
    pub professor: Option<i64>,
    pub inicio: Option<Date>,
    pub fim: Option<Date>,
    pub dias: Option<Vec<DiaAula>>,
    pub observacao: Option<String>,

    pub tui: bool,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdContratoEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a contract, interactively when no field is given")
            .arg(ResourceArgs::new(ResourceKind::Contrato).id())
            .arg(ContratoArgs::aluno(false))
            .arg(ContratoArgs::professor())
            .arg(ContratoArgs::inicio())
            .arg(ContratoArgs::fim())
            .arg(ContratoArgs::dias())
            .arg(arg_observacao())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let aluno = ContratoArgs::get_aluno(matches);
        let professor = ContratoArgs::get_professor(matches);
        let inicio = ContratoArgs::get_inicio(matches);
        let fim = ContratoArgs::get_fim(matches);
        let dias = ContratoArgs::get_dias(matches);
        let observacao = get_observacao(matches);

        let tui = aluno.is_none()
            && professor.is_none()
            && inicio.is_none()
            && fim.is_none()
            && dias.is_none()
            && observacao.is_none();

        Self {
            id: ResourceArgs::get_id(matches),
            aluno,
            professor,
            inicio,
            fim,
            dias,
            observacao,

            tui,
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    /// Overwrites the fields given on the command line.
    fn apply_to(self, contrato: &mut Contrato) {
        if let Some(aluno) = self.aluno {
            contrato.aluno_id = aluno;
        }
        if let Some(professor) = self.professor {
            contrato.professor_id = Some(professor);
        }
        if let Some(inicio) = self.inicio {
            contrato.data_inicio = inicio;
        }
        if let Some(fim) = self.fim {
            contrato.data_fim = fim;
        }
        if let Some(dias) = self.dias {
            contrato.dias_aulas = dias;
        }
        if let Some(observacao) = self.observacao {
            contrato.observacao = non_empty(observacao);
        }
    }

    pub async fn run<A: Api>(self, diario: &Diario<A>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing contrato...");
        let ui = TerminalUi::default();
        let contratos = diario.contratos();
        let result = contratos.get(self.id).await;
        let Some(mut record) = ui.settle(Contrato::KIND, Operation::Get, result) else {
            return Ok(());
        };

        let (id, output_format, verbose) = (self.id, self.output_format, self.verbose);
        let contrato = if self.tui {
            prompt_contrato(Some(&record.data))?
        } else {
            self.apply_to(&mut record.data);
            record.data
        };

        let result = contratos.update(id, &contrato).await;
        if let Some(record) = ui.settle(Contrato::KIND, Operation::Update, result) {
            print_records(&[record], output_format, verbose);
        }
        Ok(())
    }
}

/// Reviews, edits and saves the sessions of a contract.
///
/// The form starts from the sessions already saved for the contract; when there are
/// none, it is seeded with the generated schedule.
#[derive(Debug, Clone)]
pub struct CmdContratoAulas {
    pub id: i64,
    pub local: bool,
    pub yes: bool,
    pub dry_run: bool,
    pub output_format: OutputFormat,
}

impl CmdContratoAulas {
    pub const NAME: &str = "aulas";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("gerar")
            .about("Generate and review the sessions of a contract")
            .arg(ResourceArgs::new(ResourceKind::Contrato).id())
            .arg(arg!(--local "Generate the schedule here instead of asking the server"))
            .arg(arg!(-y --yes "Save the sessions without reviewing them"))
            .arg(arg!(--"dry-run" "Print the sessions that would be saved and exit"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: ResourceArgs::get_id(matches),
            local: matches.get_flag("local"),
            yes: CommonArgs::get_yes(matches),
            dry_run: matches.get_flag("dry-run"),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run<A: Api>(self, diario: &Diario<A>) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "opening session form...");
        let ui = TerminalUi::new(self.yes);
        let result = diario.contratos().get(self.id).await;
        let Some(contrato) = ui.settle(Contrato::KIND, Operation::Get, result) else {
            return Ok(());
        };

        let Some(saved) = saved_aulas(diario, &contrato, &ui).await else {
            return Ok(());
        };
        let mut form = AulaForm::from_records(saved);
        if form.is_empty() {
            let result = diario.generate_form(&contrato, self.local).await;
            match ui.settle(Aula::KIND, Operation::Generate, result) {
                Some(generated) => form = generated,
                None => return Ok(()),
            }
        }

        if self.dry_run {
            print_form(&form, self.output_format);
            let payload = serde_json::to_string_pretty(&form.to_payload())?;
            println!("{payload}");
            return Ok(());
        }

        if self.yes {
            submit(diario, &mut form, &ui).await;
            return Ok(());
        }

        review(diario, &contrato, &mut form, self.local, self.output_format).await
    }
}

/// All the saved sessions of a contract, fetched page by page.
async fn saved_aulas<A: Api>(
    diario: &Diario<A>,
    contrato: &Record<Contrato>,
    ui: &TerminalUi,
) -> Option<Vec<Record<Aula>>> {
    let mut aulas = Vec::new();
    let mut page = 1;
    let mut seen = 0u64;
    loop {
        let query = Query::page(page, MAX_PAGE_SIZE);
        let result = diario
            .aulas()
            .list_by_aluno(contrato.data.aluno_id, &query)
            .await;
        let listed = ui.settle(Aula::KIND, Operation::ListByAluno, result)?;
        let fetched = listed.data.len();
        aulas.extend(
            listed
                .data
                .into_iter()
                .filter(|a| a.data.contrato_id == Some(contrato.id)),
        );

        // The backend may cap the page size below the requested limit.
        seen += fetched as u64;
        if fetched == 0 || seen >= listed.count {
            break;
        }
        page += 1;
    }
    tracing::debug!(contrato = contrato.id, count = aulas.len(), "loaded saved sessions");
    Some(aulas)
}

async fn review<A: Api>(
    diario: &Diario<A>,
    contrato: &Record<Contrato>,
    form: &mut AulaForm,
    local: bool,
    output_format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let ui = TerminalUi::default();
    loop {
        print_form(form, output_format);
        let pending = !form.changes().is_empty();
        let action = prompt_form_action(pending)?;
        tracing::debug!(?action, "form action");
        match action {
            FormAction::Add => {
                let base = new_aula(diario, contrato, form);
                let aula = prompt_aula("New session", base)?;
                if let Err(e) = form.add(aula) {
                    ui.notify(NotifyKind::Error, &e.to_string());
                }
            }
            FormAction::Edit if !form.is_empty() => {
                let id = prompt_entry(form, "Which session?")?;
                let Some(current) = form.get(id).cloned() else {
                    continue;
                };
                let aula = prompt_aula("Edit session", current)?;
                let patch = AulaPatch {
                    data: Some(aula.data),
                    hora_inicio: Some(aula.hora_inicio),
                    hora_fim: Some(aula.hora_fim),
                    tipo: Some(aula.tipo),
                    observacao: Some(aula.observacao),
                };
                if let Err(e) = form.edit(id, &patch) {
                    ui.notify(NotifyKind::Error, &e.to_string());
                }
            }
            FormAction::Remove if !form.is_empty() => {
                let id = prompt_entry(form, "Which session?")?;
                if ui.confirm(&format!("Remove session #{id}?")) {
                    if let Err(e) = form.remove(id) {
                        ui.notify(NotifyKind::Error, &e.to_string());
                    }
                }
            }
            FormAction::Edit | FormAction::Remove => {
                ui.notify(NotifyKind::Info, "There are no sessions");
            }
            FormAction::Regenerate => {
                if pending && !ui.confirm("Discard the changes and generate the sessions again?")
                {
                    continue;
                }
                let result = diario.generate_form(contrato, local).await;
                if let Some(generated) = ui.settle(Aula::KIND, Operation::Generate, result) {
                    form.regenerate(generated.to_payload());
                }
            }
            FormAction::Submit => {
                if submit(diario, form, &ui).await && form.changes().is_empty() {
                    return Ok(());
                }
            }
            FormAction::Quit => {
                if !pending || ui.confirm("Quit without saving the changes?") {
                    return Ok(());
                }
            }
        }
    }
}

/// A new session for the contract, on the day after the last one.
fn new_aula<A>(diario: &Diario<A>, contrato: &Record<Contrato>, form: &AulaForm) -> Aula {
    let data = form
        .entries()
        .iter()
        .map(|a| a.aula.data)
        .max()
        .and_then(|a| a.tomorrow().ok())
        .unwrap_or_else(|| today().max(contrato.data.data_inicio));
    let (hora_inicio, hora_fim) = contrato
        .data
        .dias_aulas
        .first()
        .map_or((Time::midnight(), Time::midnight()), |a| {
            (a.hora_inicio, a.hora_fim)
        });

    Aula {
        aluno_id: Some(contrato.data.aluno_id),
        ..diario
            .default_aula(data, hora_inicio, hora_fim)
            .with_contrato(Some(contrato.id))
    }
}

/// Saves the form, returning whether every change went through.
async fn submit<A: Api>(diario: &Diario<A>, form: &mut AulaForm, ui: &TerminalUi) -> bool {
    match diario.aulas().submit(form).await {
        Ok(summary) => {
            ui.notify(NotifyKind::Success, &summary_message(&summary));
            true
        }
        Err(failure) => {
            ui::report_failure(ui, &failure);
            ui.notify(NotifyKind::Info, "Saved changes are kept, saving again resumes");
            false
        }
    }
}

fn summary_message(summary: &SubmitSummary) -> String {
    if summary.created + summary.updated + summary.deleted == 0 {
        return "Nothing to save".to_string();
    }
    format!(
        "Sessions saved: {} created, {} updated, {} deleted",
        summary.created, summary.updated, summary.deleted
    )
}

fn print_form(form: &AulaForm, output_format: OutputFormat) {
    if output_format == OutputFormat::Json {
        return;
    }
    if form.is_empty() {
        println!("{}", "No sessions".italic());
        return;
    }
    let rows = FormRow::rows(form);
    let formatter = Formatter::new(AulaColumn::form()).with_output_format(output_format);
    println!("{}", formatter.format(&rows));
}
