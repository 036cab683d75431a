// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Civil date and time helpers shared by the wire format and the command line.

use jiff::civil::{Date, Time};

/// Date format of the wire, stable across runs.
pub const STABLE_FORMAT_DATE: &str = "%Y-%m-%d";

/// Time format of the wire, stable across runs.
pub const STABLE_FORMAT_TIME: &str = "%H:%M";

const FORMAT_DATE_BR: &str = "%d/%m/%Y";
const FORMAT_TIME_SECONDS: &str = "%H:%M:%S";

/// Errors produced while parsing dates and times.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateTimeError {
    /// The input is not a calendar date.
    #[error("Invalid date '{0}', expected YYYY-MM-DD or DD/MM/YYYY")]
    Date(String),

    /// The input is not a wall-clock time.
    #[error("Invalid time '{0}', expected HH:MM")]
    Time(String),
}

/// Parses a calendar date.
///
/// Accepts `YYYY-MM-DD`, `DD/MM/YYYY` and ISO date-times such as
/// `2024-01-01T00:00:00.000Z`. For a date-time only the calendar date it spells is
/// kept: the time and offset are dropped, never converted, so a date stored as UTC
/// midnight does not move to the previous day.
pub fn parse_date(s: &str) -> Result<Date, DateTimeError> {
    let s = s.trim();
    let date_part = match s.as_bytes().get(10) {
        Some(b'T' | b't' | b' ') => s.get(..10).unwrap_or(s),
        _ => s,
    };

    if let Ok(date) = Date::strptime(STABLE_FORMAT_DATE, date_part) {
        Ok(date)
    } else if let Ok(date) = Date::strptime(FORMAT_DATE_BR, date_part) {
        Ok(date)
    } else {
        Err(DateTimeError::Date(s.to_string()))
    }
}

/// Parses a wall-clock time in `HH:MM` or `HH:MM:SS` form.
pub fn parse_time(s: &str) -> Result<Time, DateTimeError> {
    let s = s.trim();
    Time::strptime(STABLE_FORMAT_TIME, s)
        .or_else(|_| Time::strptime(FORMAT_TIME_SECONDS, s))
        .map_err(|_| DateTimeError::Time(s.to_string()))
}

/// Formats a date the way the API expects it.
pub fn format_date(date: Date) -> String {
    date.strftime(STABLE_FORMAT_DATE).to_string()
}

/// Formats a time the way the API expects it.
pub fn format_time(time: Time) -> String {
    time.strftime(STABLE_FORMAT_TIME).to_string()
}

/// Serde adapter for [`Date`] fields, see [`parse_date`].
pub mod serde_date {
    use jiff::civil::Date;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Writes the date as `YYYY-MM-DD`.
    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    /// Reads any form accepted by [`parse_date`](super::parse_date).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }

    /// Serde adapter for optional dates, an empty string reads as `None`.
    pub mod option {
        use jiff::civil::Date;
        use serde::{Deserialize, Deserializer, Serializer};

        /// Writes the date, or null.
        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.serialize_str(&super::super::format_date(*date)),
                None => serializer.serialize_none(),
            }
        }

        /// Reads the date, null or an empty string.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| super::super::parse_date(&raw))
                .transpose()
                .map_err(serde::de::Error::custom)
        }
    }
}

/// Serde adapter for [`Time`] fields, written as `HH:MM`.
pub mod serde_time {
    use jiff::civil::Time;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Writes the time as `HH:MM`.
    pub fn serialize<S: Serializer>(time: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*time))
    }

    /// Reads `HH:MM` or `HH:MM:SS`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
