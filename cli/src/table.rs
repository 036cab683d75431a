// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

/// Plain-text table, one row per item, columns padded to the widest cell.
#[derive(Debug)]
pub struct Table<'a, T, C> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'a str,
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: "  ",
        }
    }

    fn widths(&self, rows: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.name().width()).collect();
        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }
        widths
    }

    fn pad(&self, i: usize, cell: &str, width: usize) -> String {
        let last = i + 1 == self.columns.len();
        let fill = " ".repeat(width.saturating_sub(cell.width()));
        match self.columns.get(i).map(|c| c.padding_direction()) {
            Some(PaddingDirection::Right) => format!("{fill}{cell}"),
            _ if last => cell.to_string(), // no trailing spaces
            _ => format!("{cell}{fill}"),
        }
    }
}

impl<T, C: TableColumn<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<Cow<'_, str>>> = self
            .data
            .iter()
            .map(|item| self.columns.iter().map(|c| c.format(item)).collect())
            .collect();
        let widths = self.widths(&rows);

        let mut lines = Vec::with_capacity(rows.len() + 1);
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (c, w))| self.pad(i, &c.name(), *w).bold().to_string())
            .collect();
        lines.push(header.join(self.separator));

        for (item, row) in self.data.iter().zip(&rows) {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, w))| {
                    let cell = self.pad(i, cell, *w);
                    match self.columns.get(i).and_then(|c| c.get_color(item)) {
                        Some(color) => cell.color(color).to_string(),
                        None => cell,
                    }
                })
                .collect();
            lines.push(cells.join(self.separator));
        }

        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum Col {
        Id,
        Nome,
    }

    impl TableColumn<(i64, &'static str)> for Col {
        fn name(&self) -> Cow<'_, str> {
            match self {
                Col::Id => "ID".into(),
                Col::Nome => "Nome".into(),
            }
        }

        fn format<'a>(&self, data: &'a (i64, &'static str)) -> Cow<'a, str> {
            match self {
                Col::Id => data.0.to_string().into(),
                Col::Nome => data.1.into(),
            }
        }

        fn padding_direction(&self) -> PaddingDirection {
            match self {
                Col::Id => PaddingDirection::Right,
                Col::Nome => PaddingDirection::Left,
            }
        }
    }

    #[test]
    fn test_table_pads_by_display_width() {
        colored::control::set_override(false);

        let columns = [Col::Id, Col::Nome, Col::Id];
        let data = [(3, "João"), (120, "中文名")];
        let out = Table::new(&columns, &data).to_string();

        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], " ID  Nome     ID");
        assert_eq!(lines[1], "  3  João      3");
        assert_eq!(lines[2], "120  中文名  120");
    }

    #[test]
    fn test_table_empty() {
        colored::control::set_override(false);

        let columns = [Col::Id, Col::Nome];
        let data: [(i64, &'static str); 0] = [];
        assert_eq!(Table::new(&columns, &data).to_string(), "ID  Nome");
    }
}
