// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use diario_core::datetime::{format_date, format_time};
use diario_core::{
    Aluno, Aula, AulaForm, Contrato, DiaAula, DiaSemana, LocalId, Professor, Record, Resource,
    TipoAula,
};
use jiff::civil::Date;
use serde::Serialize;

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::{OutputFormat, single_line, today, truncate};

const NOTE_WIDTH: usize = 32;

#[derive(Debug)]
pub struct Formatter<C> {
    columns: Vec<C>,
    format: OutputFormat,
}

impl<C> Formatter<C> {
    pub fn new(columns: Vec<C>) -> Self {
        Self {
            columns,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a, T>(&'a self, data: &'a [T]) -> Display<'a, T, C> {
        Display {
            data,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a, T, C> {
    data: &'a [T],
    formatter: &'a Formatter<C>,
}

impl<T: Serialize, C: TableColumn<T>> fmt::Display for Display<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.data).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
            OutputFormat::Table => {
                write!(f, "{}", Table::new(&self.formatter.columns, self.data))
            }
        }
    }
}

/// A resource the command line knows how to print.
pub trait Printable: Resource {
    type Column: TableColumn<Record<Self>> + fmt::Debug;

    fn columns(verbose: bool) -> Vec<Self::Column>;
}

pub fn print_records<R: Printable>(records: &[Record<R>], format: OutputFormat, verbose: bool) {
    let formatter = Formatter::new(R::columns(verbose)).with_output_format(format);
    println!("{}", formatter.format(records));
}

fn note(observacao: Option<&String>) -> Cow<'_, str> {
    match observacao {
        Some(a) => match single_line(a) {
            Cow::Borrowed(a) => truncate(a, NOTE_WIDTH),
            Cow::Owned(a) => Cow::Owned(truncate(&a, NOTE_WIDTH).into_owned()),
        },
        None => Cow::Borrowed(""),
    }
}

fn optional(value: Option<&String>) -> Cow<'_, str> {
    value.map_or(Cow::Borrowed(""), |a| Cow::Borrowed(a.as_str()))
}

#[derive(Debug, Clone, Copy)]
pub enum AlunoColumn {
    Id,
    Nome,
    Email,
    Telefone,
    Responsavel,
    Observacao,
}

impl TableColumn<Record<Aluno>> for AlunoColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Nome => "Nome",
            Self::Email => "E-mail",
            Self::Telefone => "Telefone",
            Self::Responsavel => "Responsável",
            Self::Observacao => "Observação",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Record<Aluno>) -> Cow<'a, str> {
        let aluno = &data.data;
        match self {
            Self::Id => data.id.to_string().into(),
            Self::Nome => aluno.nome.as_str().into(),
            Self::Email => optional(aluno.email.as_ref()),
            Self::Telefone => optional(aluno.telefone.as_ref()),
            Self::Responsavel => optional(aluno.responsavel.as_ref()),
            Self::Observacao => note(aluno.observacao.as_ref()),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Id => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }
}

impl Printable for Aluno {
    type Column = AlunoColumn;

    fn columns(verbose: bool) -> Vec<AlunoColumn> {
        use AlunoColumn::*;
        if verbose {
            vec![Id, Nome, Email, Telefone, Responsavel, Observacao]
        } else {
            vec![Id, Nome, Email, Telefone]
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ProfessorColumn {
    Id,
    Nome,
    Email,
    Telefone,
}

impl TableColumn<Record<Professor>> for ProfessorColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Nome => "Nome",
            Self::Email => "E-mail",
            Self::Telefone => "Telefone",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Record<Professor>) -> Cow<'a, str> {
        let professor = &data.data;
        match self {
            Self::Id => data.id.to_string().into(),
            Self::Nome => professor.nome.as_str().into(),
            Self::Email => optional(professor.email.as_ref()),
            Self::Telefone => optional(professor.telefone.as_ref()),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Id => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }
}

impl Printable for Professor {
    type Column = ProfessorColumn;

    fn columns(_verbose: bool) -> Vec<ProfessorColumn> {
        use ProfessorColumn::*;
        vec![Id, Nome, Email, Telefone]
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ContratoColumn {
    Id,
    Aluno,
    Professor,
    /// The contract period, colored against the given day.
    Periodo(Date),
    Dias,
    Observacao,
}

impl TableColumn<Record<Contrato>> for ContratoColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Aluno => "Aluno",
            Self::Professor => "Professor",
            Self::Periodo(_) => "Período",
            Self::Dias => "Dias",
            Self::Observacao => "Observação",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Record<Contrato>) -> Cow<'a, str> {
        let contrato = &data.data;
        match self {
            Self::Id => data.id.to_string().into(),
            Self::Aluno => contrato.aluno_id.to_string().into(),
            Self::Professor => contrato
                .professor_id
                .map_or(Cow::Borrowed(""), |a| a.to_string().into()),
            Self::Periodo(_) => format!(
                "{} ~ {}",
                format_date(contrato.data_inicio),
                format_date(contrato.data_fim)
            )
            .into(),
            Self::Dias => contrato
                .dias_aulas
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
                .into(),
            Self::Observacao => note(contrato.observacao.as_ref()),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Id | Self::Aluno | Self::Professor => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &Record<Contrato>) -> Option<Color> {
        match self {
            Self::Periodo(today) if data.data.data_fim < *today => Some(Color::BrightBlack),
            Self::Periodo(today) if data.data.data_inicio <= *today => Some(Color::Green),
            _ => None,
        }
    }
}

impl Printable for Contrato {
    type Column = ContratoColumn;

    fn columns(verbose: bool) -> Vec<ContratoColumn> {
        use ContratoColumn::*;
        if verbose {
            vec![Id, Aluno, Professor, Periodo(today()), Dias, Observacao]
        } else {
            vec![Id, Aluno, Periodo(today()), Dias]
        }
    }
}

/// A session as listed, either persisted or in a form.
pub trait AulaRow {
    fn label(&self) -> Cow<'_, str>;

    fn aula(&self) -> &Aula;

    fn state(&self) -> Option<FormState> {
        None
    }
}

impl AulaRow for Record<Aula> {
    fn label(&self) -> Cow<'_, str> {
        self.id.to_string().into()
    }

    fn aula(&self) -> &Aula {
        &self.data
    }
}

/// Whether a session of a form still has to be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    New,
    Edited,
    Saved,
}

/// A session of a form, as printed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRow {
    pub local_id: LocalId,
    pub id: Option<i64>,
    pub state: FormState,
    #[serde(flatten)]
    pub aula: Aula,
}

impl FormRow {
    pub fn rows(form: &AulaForm) -> Vec<Self> {
        let changes = form.changes();
        form.entries()
            .iter()
            .map(|entry| {
                let state = if changes.create.iter().any(|a| a.id == entry.id) {
                    FormState::New
                } else if changes.update.iter().any(|(a, _)| a.id == entry.id) {
                    FormState::Edited
                } else {
                    FormState::Saved
                };
                FormRow {
                    local_id: entry.id,
                    id: form.remote_id(entry.id),
                    state,
                    aula: entry.aula.clone(),
                }
            })
            .collect()
    }
}

impl AulaRow for FormRow {
    fn label(&self) -> Cow<'_, str> {
        format!("#{}", self.local_id).into()
    }

    fn aula(&self) -> &Aula {
        &self.aula
    }

    fn state(&self) -> Option<FormState> {
        Some(self.state)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum AulaColumn {
    Id,
    Data,
    Dia,
    Horario,
    Tipo,
    Contrato,
    State,
    Observacao,
}

impl AulaColumn {
    pub fn form() -> Vec<Self> {
        use AulaColumn::*;
        vec![Id, Data, Dia, Horario, Tipo, State, Observacao]
    }
}

impl<T: AulaRow> TableColumn<T> for AulaColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Data => "Data",
            Self::Dia => "Dia",
            Self::Horario => "Horário",
            Self::Tipo => "Tipo",
            Self::Contrato => "Contrato",
            Self::State => "Estado",
            Self::Observacao => "Observação",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str> {
        let aula = data.aula();
        match self {
            Self::Id => data.label(),
            Self::Data => format_date(aula.data).into(),
            Self::Dia => DiaSemana::of(aula.data).as_str().into(),
            Self::Horario => format!(
                "{}-{}",
                format_time(aula.hora_inicio),
                format_time(aula.hora_fim)
            )
            .into(),
            Self::Tipo => aula.tipo.as_str().into(),
            Self::Contrato => aula
                .contrato_id
                .map_or(Cow::Borrowed(""), |a| a.to_string().into()),
            Self::State => match data.state() {
                Some(FormState::New) => "novo",
                Some(FormState::Edited) => "alterado",
                Some(FormState::Saved) => "salvo",
                None => "",
            }
            .into(),
            Self::Observacao => note(aula.observacao.as_ref()),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Id | Self::Contrato => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &T) -> Option<Color> {
        match self {
            Self::Tipo => match data.aula().tipo {
                TipoAula::Padrao => None,
                TipoAula::Reposicao => Some(Color::Yellow),
                TipoAula::Outra => Some(Color::Cyan),
            },
            Self::State => match data.state() {
                Some(FormState::New) => Some(Color::Green),
                Some(FormState::Edited) => Some(Color::Yellow),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Printable for Aula {
    type Column = AulaColumn;

    fn columns(verbose: bool) -> Vec<AulaColumn> {
        use AulaColumn::*;
        if verbose {
            vec![Id, Data, Dia, Horario, Tipo, Contrato, Observacao]
        } else {
            vec![Id, Data, Dia, Horario, Tipo]
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum DiaAulaColumn {
    Id,
    Contrato,
    Dia,
    Horario,
}

impl TableColumn<Record<DiaAula>> for DiaAulaColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Contrato => "Contrato",
            Self::Dia => "Dia",
            Self::Horario => "Horário",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Record<DiaAula>) -> Cow<'a, str> {
        let dia = &data.data;
        match self {
            Self::Id => data.id.to_string().into(),
            Self::Contrato => dia
                .contrato_id
                .map_or(Cow::Borrowed(""), |a| a.to_string().into()),
            Self::Dia => dia.dia.as_str().into(),
            Self::Horario => format!(
                "{}-{}",
                format_time(dia.hora_inicio),
                format_time(dia.hora_fim)
            )
            .into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Id | Self::Contrato => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }
}

impl Printable for DiaAula {
    type Column = DiaAulaColumn;

    fn columns(_verbose: bool) -> Vec<DiaAulaColumn> {
        use DiaAulaColumn::*;
        vec![Id, Contrato, Dia, Horario]
    }
}
