// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use diario_core::datetime::{parse_date, parse_time};
use jiff::civil::{Date, Time};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Value parser for date arguments, see [`parse_date`].
pub fn date_value(s: &str) -> Result<Date, String> {
    parse_date(s).map_err(|e| e.to_string())
}

/// Value parser for time arguments, see [`parse_time`].
pub fn time_value(s: &str) -> Result<Time, String> {
    parse_time(s).map_err(|e| e.to_string())
}

/// The local calendar date.
pub fn today() -> Date {
    jiff::Zoned::now().date()
}

/// Cut `s` to at most `max_width` columns, ending with an ellipsis when cut.
///
/// Splits on grapheme clusters, so combining marks and wide characters stay whole.
pub fn truncate(s: &str, max_width: usize) -> Cow<'_, str> {
    if s.width() <= max_width {
        return Cow::Borrowed(s);
    }

    let budget = max_width.saturating_sub(1); // room for the ellipsis
    let mut width = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = g.width();
        if width + w > budget {
            break;
        }
        width += w;
        out.push_str(g);
    }
    out.push('…');
    Cow::Owned(out)
}

/// Collapse line breaks so a value fits in one table cell.
pub fn single_line(s: &str) -> Cow<'_, str> {
    if s.contains(['\n', '\r']) {
        Cow::Owned(s.split_whitespace().collect::<Vec<_>>().join(" "))
    } else {
        Cow::Borrowed(s)
    }
}
