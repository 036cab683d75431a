// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fmt::Display, str::FromStr};

use cliclack::{input, intro, note, outro, select};
use diario_core::datetime::{format_date, format_time, parse_date, parse_time};
use diario_core::{
    Aluno, Aula, AulaForm, Contrato, DiaAula, DiaSemana, LocalId, Professor, TipoAula,
};
use jiff::civil::{Date, Time};

use crate::arg::non_empty;

const DATE_NOTE: &str = "\
• Date: 2024-01-15 or 15/01/2024
• Time: 14:30
• Day:  DOMINGO, SEGUNDA, TERCA, QUARTA, QUINTA, SEXTA, SABADO";

fn text(prompt: &str, initial: Option<&str>, required: bool) -> Result<String, Box<dyn Error>> {
    let mut field = input(prompt).required(required);
    if let Some(initial) = initial.filter(|a| !a.is_empty()) {
        field = field.default_input(initial);
    }
    let value: String = field.interact()?;
    Ok(value.trim().to_string())
}

fn optional_text(prompt: &str, initial: Option<&String>) -> Result<Option<String>, Box<dyn Error>> {
    let value = text(prompt, initial.map(String::as_str), false)?;
    Ok(non_empty(value))
}

/// Ask until the answer parses, the way `parse` reads it.
fn parsed<T, E, F>(prompt: &str, initial: Option<String>, parse: F) -> Result<T, Box<dyn Error>>
where
    E: Display,
    F: Fn(&str) -> Result<T, E> + Clone + 'static,
{
    let check = parse.clone();
    let mut field = input(prompt).validate(move |s: &String| match check(s.trim()) {
        Ok(_) => Ok(()),
        Err(e) => Err(e.to_string()),
    });
    if let Some(initial) = initial {
        field = field.default_input(&initial);
    }
    let value: String = field.interact()?;
    parse(value.trim()).map_err(|e| e.to_string().into())
}

fn optional_id(prompt: &str, initial: Option<i64>) -> Result<Option<i64>, Box<dyn Error>> {
    parsed(prompt, initial.map(|a| a.to_string()), |s| match s {
        "" => Ok(None),
        s => s.parse::<i64>().map(Some),
    })
}

fn date(prompt: &str, initial: Option<Date>) -> Result<Date, Box<dyn Error>> {
    parsed(prompt, initial.map(format_date), parse_date)
}

fn time(prompt: &str, initial: Option<Time>) -> Result<Time, Box<dyn Error>> {
    parsed(prompt, initial.map(format_time), parse_time)
}

fn parse_dias(s: &str) -> Result<Vec<DiaAula>, String> {
    s.split([',', ';'])
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(DiaAula::from_str)
        .collect()
}

pub fn prompt_aluno(initial: Option<&Aluno>) -> Result<Aluno, Box<dyn Error>> {
    intro(if initial.is_some() { "Edit aluno" } else { "New aluno" })?;
    let nome = text("Nome", initial.map(|a| a.nome.as_str()), true)?;
    let aluno = Aluno {
        nome,
        email: optional_text("E-mail", initial.and_then(|a| a.email.as_ref()))?,
        telefone: optional_text("Telefone", initial.and_then(|a| a.telefone.as_ref()))?,
        responsavel: optional_text("Responsável", initial.and_then(|a| a.responsavel.as_ref()))?,
        observacao: optional_text("Observação", initial.and_then(|a| a.observacao.as_ref()))?,
    };
    outro("Sending...")?;
    Ok(aluno)
}

pub fn prompt_professor(initial: Option<&Professor>) -> Result<Professor, Box<dyn Error>> {
    intro(if initial.is_some() { "Edit professor" } else { "New professor" })?;
    let nome = text("Nome", initial.map(|a| a.nome.as_str()), true)?;
    let professor = Professor {
        nome,
        email: optional_text("E-mail", initial.and_then(|a| a.email.as_ref()))?,
        telefone: optional_text("Telefone", initial.and_then(|a| a.telefone.as_ref()))?,
    };
    outro("Sending...")?;
    Ok(professor)
}

pub fn prompt_contrato(initial: Option<&Contrato>) -> Result<Contrato, Box<dyn Error>> {
    intro(if initial.is_some() { "Edit contrato" } else { "New contrato" })?;
    note("Supported formats:", DATE_NOTE)?;

    let aluno_id = parsed(
        "Aluno (id)",
        initial.map(|a| a.aluno_id.to_string()),
        |s| s.parse::<i64>(),
    )?;
    let professor_id = optional_id(
        "Professor (id, empty for none)",
        initial.and_then(|a| a.professor_id),
    )?;
    let data_inicio = date("Início", initial.map(|a| a.data_inicio))?;
    let data_fim = date("Fim", initial.map(|a| a.data_fim))?;
    let dias = initial.map(|a| {
        a.dias_aulas
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    });
    let dias_aulas = parsed(
        "Dias (e.g. SEGUNDA@09:00-10:00, QUARTA@14:00-15:00)",
        dias.filter(|a| !a.is_empty()),
        parse_dias,
    )?;
    let observacao = optional_text("Observação", initial.and_then(|a| a.observacao.as_ref()))?;

    outro("Sending...")?;
    Ok(Contrato {
        aluno_id,
        professor_id,
        data_inicio,
        data_fim,
        dias_aulas,
        observacao,
    })
}

/// Fill in a session, starting from `base`.
pub fn prompt_aula(title: &str, base: Aula) -> Result<Aula, Box<dyn Error>> {
    intro(title)?;
    let data = date("Data", Some(base.data))?;
    let hora_inicio = time("Início", Some(base.hora_inicio))?;
    let hora_fim = time("Fim", Some(base.hora_fim))?;
    let tipo = select("Tipo")
        .initial_value(base.tipo)
        .item(TipoAula::Padrao, "Padrão", "")
        .item(TipoAula::Reposicao, "Reposição", "makes up a missed session")
        .item(TipoAula::Outra, "Outra", "")
        .interact()?;
    let observacao = optional_text("Observação", base.observacao.as_ref())?;
    outro("Done")?;

    Ok(Aula {
        data,
        hora_inicio,
        hora_fim,
        tipo,
        observacao,
        ..base
    })
}

pub fn prompt_dia_aula(initial: Option<&DiaAula>) -> Result<DiaAula, Box<dyn Error>> {
    intro(if initial.is_some() { "Edit dia de aula" } else { "New dia de aula" })?;
    let mut days = select("Dia");
    if let Some(initial) = initial {
        days = days.initial_value(initial.dia);
    }
    for dia in DiaSemana::ALL {
        days = days.item(dia, dia.as_str(), "");
    }
    let dia = days.interact()?;
    let hora_inicio = time("Início", initial.map(|a| a.hora_inicio))?;
    let hora_fim = time("Fim", initial.map(|a| a.hora_fim))?;
    let contrato_id = optional_id("Contrato (id, empty for none)", initial.and_then(|a| a.contrato_id))?;
    outro("Sending...")?;

    Ok(DiaAula {
        dia,
        hora_inicio,
        hora_fim,
        contrato_id,
    })
}

/// What to do next with a session form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Add,
    Edit,
    Remove,
    Regenerate,
    Submit,
    Quit,
}

pub fn prompt_form_action(pending: bool) -> Result<FormAction, Box<dyn Error>> {
    let action = select("What next?")
        .initial_value(if pending { FormAction::Submit } else { FormAction::Quit })
        .item(FormAction::Add, "Add a session", "")
        .item(FormAction::Edit, "Edit a session", "")
        .item(FormAction::Remove, "Remove a session", "")
        .item(FormAction::Regenerate, "Generate again", "discards the list")
        .item(FormAction::Submit, "Save", "")
        .item(FormAction::Quit, "Quit", "")
        .interact()?;
    Ok(action)
}

pub fn prompt_entry(form: &AulaForm, prompt: &str) -> Result<LocalId, Box<dyn Error>> {
    let mut entries = select(prompt);
    for entry in form.entries() {
        let aula = &entry.aula;
        let label = format!(
            "#{} {} {} {}-{}",
            entry.id,
            format_date(aula.data),
            DiaSemana::of(aula.data),
            format_time(aula.hora_inicio),
            format_time(aula.hora_fim),
        );
        entries = entries.item(entry.id, label, aula.tipo.as_str());
    }
    Ok(entries.interact()?)
}
