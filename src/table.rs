//! Table rendering for tabular results with columns known only at runtime.
//!
//! The column schema comes from the first row alone. Columns that only
//! appear in later rows are not shown, and a later row missing a schema
//! column gets an empty cell. Heterogeneous rows therefore lose data; the
//! behavior is kept so output matches what the backend's web client shows.

use serde_json::Value;

use crate::constants::{EMPTY_RESULT_PLACEHOLDER, NULL_CELL};
use crate::models::{ClassifiedResult, Row};

/// Ordered column names of a result
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnSchema(pub Vec<String>);

impl ColumnSchema {
    /// Derive the schema from the keys of the first row
    pub fn from_rows(rows: &[Row]) -> Self {
        ColumnSchema(
            rows.first()
                .map(|row| row.keys().cloned().collect())
                .unwrap_or_default(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Rendered grid of cell texts
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Build a grid using the first row's schema for every row
    pub fn build(rows: &[Row]) -> Self {
        let schema = ColumnSchema::from_rows(rows);
        let cells = rows
            .iter()
            .map(|row| {
                schema
                    .0
                    .iter()
                    .map(|column| cell_text(row.get(column)))
                    .collect()
            })
            .collect();

        TableGrid {
            headers: schema.0,
            rows: cells,
        }
    }

    /// Display width of each column (header included), in chars
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Plain-text rendering with padded columns
    pub fn to_text(&self) -> String {
        let widths = self.column_widths();
        let format_line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut lines = vec![format_line(&self.headers)];
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        lines.extend(self.rows.iter().map(|row| format_line(row)));
        lines.join("\n")
    }
}

/// What the result area shows for a classified result
#[derive(Clone, Debug, PartialEq)]
pub enum ResultView {
    Error(String),
    Info(String),
    Table {
        question: String,
        sql: Option<String>,
        grid: TableGrid,
    },
    /// Tabular result without rows; shows the placeholder text
    Empty {
        question: String,
        sql: Option<String>,
    },
}

impl ResultView {
    pub fn from_result(result: &ClassifiedResult) -> Self {
        match result {
            ClassifiedResult::Error(text) => ResultView::Error(text.clone()),
            ClassifiedResult::Message(text) => ResultView::Info(text.clone()),
            ClassifiedResult::Tabular { question, sql, rows } if rows.is_empty() => {
                ResultView::Empty {
                    question: question.clone(),
                    sql: sql.clone(),
                }
            }
            ClassifiedResult::Tabular { question, sql, rows } => ResultView::Table {
                question: question.clone(),
                sql: sql.clone(),
                grid: TableGrid::build(rows),
            },
        }
    }

    /// Plain-text form, used by one-shot mode
    pub fn to_text(&self) -> String {
        match self {
            ResultView::Error(text) => format!("Error: {}", text),
            ResultView::Info(text) => text.clone(),
            ResultView::Empty { question, sql } => {
                let mut out = heading(question, sql.as_deref());
                out.push_str(EMPTY_RESULT_PLACEHOLDER);
                out
            }
            ResultView::Table { question, sql, grid } => {
                let mut out = heading(question, sql.as_deref());
                out.push_str(&grid.to_text());
                out
            }
        }
    }
}

fn heading(question: &str, sql: Option<&str>) -> String {
    let mut out = String::new();
    if !question.is_empty() {
        out.push_str(question);
        out.push_str("\n\n");
    }
    if let Some(sql) = sql {
        out.push_str(&format!("SQL: {}\n\n", sql));
    }
    out
}

/// Cell text: null shows as `N/A`, a missing field as empty, anything else
/// as its literal text.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::Null) => NULL_CELL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
