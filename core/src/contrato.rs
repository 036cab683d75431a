// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use jiff::civil::{Date, Time, Weekday};
use serde::{Deserialize, Serialize};

use crate::datetime::{format_time, parse_time, serde_date, serde_time};
use crate::store::{Slice, Store};
use crate::{Resource, ResourceKind};

/// A contract between a student and the school, valid for a date range and
/// following a weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contrato {
    /// The student the contract belongs to.
    pub aluno_id: i64,

    /// The professor teaching the classes, if assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor_id: Option<i64>,

    /// First day of validity.
    #[serde(with = "serde_date")]
    pub data_inicio: Date,

    /// Last day of validity, inclusive.
    #[serde(with = "serde_date")]
    pub data_fim: Date,

    /// Weekly class-day rules.
    #[serde(default)]
    pub dias_aulas: Vec<DiaAula>,

    /// Free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacao: Option<String>,
}

impl Resource for Contrato {
    const KIND: ResourceKind = ResourceKind::Contrato;

    fn slice(store: &Store) -> &Slice<Self> {
        &store.contratos
    }
}

/// A weekly class-day rule: every `dia`, from `hora_inicio` to `hora_fim`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaAula {
    /// Day of the week.
    pub dia: DiaSemana,

    /// Start time.
    #[serde(with = "serde_time")]
    pub hora_inicio: Time,

    /// End time.
    #[serde(with = "serde_time")]
    pub hora_fim: Time,

    /// The contract this rule belongs to, when used as a standalone resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrato_id: Option<i64>,
}

impl DiaAula {
    /// Creates a rule not yet attached to a contract.
    pub fn new(dia: DiaSemana, hora_inicio: Time, hora_fim: Time) -> Self {
        Self {
            dia,
            hora_inicio,
            hora_fim,
            contrato_id: None,
        }
    }
}

impl Resource for DiaAula {
    const KIND: ResourceKind = ResourceKind::DiaAula;

    fn slice(store: &Store) -> &Slice<Self> {
        &store.dias_aulas
    }
}

impl fmt::Display for DiaAula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}-{}",
            self.dia,
            format_time(self.hora_inicio),
            format_time(self.hora_fim)
        )
    }
}

/// Parses `DAY@HH:MM-HH:MM`, e.g. `segunda@09:00-10:00`.
impl FromStr for DiaAula {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (dia, range) = s
            .split_once('@')
            .ok_or_else(|| format!("Invalid class day '{s}', expected DAY@HH:MM-HH:MM"))?;
        let (inicio, fim) = range
            .split_once('-')
            .ok_or_else(|| format!("Invalid time range '{range}', expected HH:MM-HH:MM"))?;

        Ok(DiaAula::new(
            dia.parse()?,
            parse_time(inicio).map_err(|e| e.to_string())?,
            parse_time(fim).map_err(|e| e.to_string())?,
        ))
    }
}

/// Day of the week, as labelled by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DiaSemana {
    /// Sunday.
    #[serde(alias = "SUNDAY")]
    #[cfg_attr(feature = "clap", value(alias = "dom"))]
    Domingo,

    /// Monday.
    #[serde(alias = "MONDAY")]
    #[cfg_attr(feature = "clap", value(alias = "seg"))]
    Segunda,

    /// Tuesday.
    #[serde(alias = "TUESDAY")]
    #[cfg_attr(feature = "clap", value(alias = "ter"))]
    Terca,

    /// Wednesday.
    #[serde(alias = "WEDNESDAY")]
    #[cfg_attr(feature = "clap", value(alias = "qua"))]
    Quarta,

    /// Thursday.
    #[serde(alias = "THURSDAY")]
    #[cfg_attr(feature = "clap", value(alias = "qui"))]
    Quinta,

    /// Friday.
    #[serde(alias = "FRIDAY")]
    #[cfg_attr(feature = "clap", value(alias = "sex"))]
    Sexta,

    /// Saturday.
    #[serde(alias = "SATURDAY")]
    #[cfg_attr(feature = "clap", value(alias = "sab"))]
    Sabado,
}

impl DiaSemana {
    /// All days, starting on Sunday.
    pub const ALL: [DiaSemana; 7] = [
        DiaSemana::Domingo,
        DiaSemana::Segunda,
        DiaSemana::Terca,
        DiaSemana::Quarta,
        DiaSemana::Quinta,
        DiaSemana::Sexta,
        DiaSemana::Sabado,
    ];

    /// The wire label.
    pub const fn as_str(self) -> &'static str {
        match self {
            DiaSemana::Domingo => "DOMINGO",
            DiaSemana::Segunda => "SEGUNDA",
            DiaSemana::Terca => "TERCA",
            DiaSemana::Quarta => "QUARTA",
            DiaSemana::Quinta => "QUINTA",
            DiaSemana::Sexta => "SEXTA",
            DiaSemana::Sabado => "SABADO",
        }
    }

    /// The weekday of a date.
    pub fn of(date: Date) -> Self {
        date.weekday().into()
    }
}

impl fmt::Display for DiaSemana {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Weekday> for DiaSemana {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Sunday => DiaSemana::Domingo,
            Weekday::Monday => DiaSemana::Segunda,
            Weekday::Tuesday => DiaSemana::Terca,
            Weekday::Wednesday => DiaSemana::Quarta,
            Weekday::Thursday => DiaSemana::Quinta,
            Weekday::Friday => DiaSemana::Sexta,
            Weekday::Saturday => DiaSemana::Sabado,
        }
    }
}

impl From<DiaSemana> for Weekday {
    fn from(value: DiaSemana) -> Self {
        match value {
            DiaSemana::Domingo => Weekday::Sunday,
            DiaSemana::Segunda => Weekday::Monday,
            DiaSemana::Terca => Weekday::Tuesday,
            DiaSemana::Quarta => Weekday::Wednesday,
            DiaSemana::Quinta => Weekday::Thursday,
            DiaSemana::Sexta => Weekday::Friday,
            DiaSemana::Sabado => Weekday::Saturday,
        }
    }
}

/// Case-insensitive; accepts Portuguese names with or without accents, their
/// three-letter abbreviations and English names.
impl FromStr for DiaSemana {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dia = match s.trim().to_lowercase().as_str() {
            "domingo" | "dom" | "sunday" => DiaSemana::Domingo,
            "segunda" | "segunda-feira" | "seg" | "monday" => DiaSemana::Segunda,
            "terca" | "terça" | "terça-feira" | "terca-feira" | "ter" | "tuesday" => {
                DiaSemana::Terca
            }
            "quarta" | "quarta-feira" | "qua" | "wednesday" => DiaSemana::Quarta,
            "quinta" | "quinta-feira" | "qui" | "thursday" => DiaSemana::Quinta,
            "sexta" | "sexta-feira" | "sex" | "friday" => DiaSemana::Sexta,
            "sabado" | "sábado" | "sab" | "sáb" | "saturday" => DiaSemana::Sabado,
            _ => return Err(format!("Invalid day of week '{s}'")),
        };
        Ok(dia)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;

    #[test]
    fn weekday_round_trips_through_jiff() {
        for dia in DiaSemana::ALL {
            assert_eq!(DiaSemana::from(Weekday::from(dia)), dia);
        }
        assert_eq!(DiaSemana::of(date(2024, 1, 1)), DiaSemana::Segunda);
    }

    #[test]
    fn parses_day_names() {
        assert_eq!("Terça".parse::<DiaSemana>().unwrap(), DiaSemana::Terca);
        assert_eq!("sab".parse::<DiaSemana>().unwrap(), DiaSemana::Sabado);
        assert_eq!("MONDAY".parse::<DiaSemana>().unwrap(), DiaSemana::Segunda);
        assert!("someday".parse::<DiaSemana>().is_err());
    }

    #[test]
    fn parses_class_day_rule() {
        let rule: DiaAula = "quarta@14:00-15:30".parse().unwrap();
        assert_eq!(rule.dia, DiaSemana::Quarta);
        assert_eq!(rule.hora_inicio, time(14, 0, 0, 0));
        assert_eq!(rule.hora_fim, time(15, 30, 0, 0));
        assert_eq!(rule.to_string(), "QUARTA@14:00-15:30");

        assert!("quarta 14:00-15:30".parse::<DiaAula>().is_err());
        assert!("quarta@14:00".parse::<DiaAula>().is_err());
    }

    #[test]
    fn contract_wire_format() {
        let json = r#"{
            "alunoId": 7,
            "dataInicio": "2024-01-01T00:00:00.000Z",
            "dataFim": "2024-06-30",
            "diasAulas": [{"dia": "MONDAY", "horaInicio": "09:00", "horaFim": "10:00:00"}]
        }"#;
        let contrato: Contrato = serde_json::from_str(json).unwrap();
        assert_eq!(contrato.aluno_id, 7);
        assert_eq!(contrato.data_inicio, date(2024, 1, 1));
        assert_eq!(contrato.dias_aulas[0].dia, DiaSemana::Segunda);
        assert_eq!(contrato.dias_aulas[0].hora_fim, time(10, 0, 0, 0));

        let value = serde_json::to_value(&contrato).unwrap();
        assert_eq!(value["dataInicio"], "2024-01-01");
        assert_eq!(value["diasAulas"][0]["dia"], "SEGUNDA");
        assert_eq!(value["diasAulas"][0]["horaFim"], "10:00");
    }
}
