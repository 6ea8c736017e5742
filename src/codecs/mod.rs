//! Reading translation files and rendering results.
//!
//! Inputs are parsed into a translation tree whatever their format; outputs
//! are rendered to a string in full before anything is written.

mod html;
mod json;
mod tabular;

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::core::{AuditReport, ClassifiedEntry, flatten};
use crate::error::{AuditError, Result};

pub use html::render_table;
pub use json::{parse_tree, render_tree};
pub use tabular::{parse_rows, write_rows};

/// Columns of an audit report, in output order.
pub const REPORT_COLUMNS: [&str; 5] = ["status", "key", "value", "similar", "source"];
/// Columns of a flattened translation tree.
pub const TREE_COLUMNS: [&str; 2] = ["key", "value"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
    Html,
    /// A script exporting the tree. Recognised only to be refused.
    Executable,
}

impl Format {
    /// Pick the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(Format::Json),
            "csv" => Ok(Format::Csv),
            "html" | "htm" => Ok(Format::Html),
            "js" | "mjs" | "cjs" | "ts" => Ok(Format::Executable),
            other => Err(AuditError::input(
                path,
                format!("Unsupported file type '{}'", other),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
            Format::Html => "html",
            Format::Executable => "js",
        }
    }
}

/// What gets rendered.
#[derive(Debug, Clone, Copy)]
pub enum Output<'a> {
    Tree(&'a Value),
    Report(&'a AuditReport),
}

/// Load a translation tree from `path`.
pub fn read_tree(path: &Path) -> Result<Value> {
    let format = Format::from_path(path)?;
    match format {
        Format::Executable => {
            return Err(AuditError::input(
                path,
                "Refusing to execute a script as translation input, export it to JSON first",
            ));
        }
        Format::Html => {
            return Err(AuditError::input(path, "HTML is an output-only format"));
        }
        Format::Json | Format::Csv => {}
    }

    let content = fs::read_to_string(path)
        .map_err(|e| AuditError::input(path, format!("Failed to read input ({})", e)))?;

    match format {
        Format::Csv => {
            let entries = parse_rows(&content).map_err(|message| AuditError::input(path, message))?;
            Ok(crate::core::unflatten(&entries)?)
        }
        _ => parse_tree(&content).map_err(|message| AuditError::input(path, message)),
    }
}

/// Render `output` in `format`.
pub fn render(output: Output<'_>, format: Format) -> Result<String> {
    match (format, output) {
        (Format::Json, Output::Tree(tree)) => render_tree(tree),
        (Format::Json, Output::Report(report)) => {
            let rows: Vec<Value> = report.iter().map(report_object).collect();
            render_tree(&Value::Array(rows))
        }
        (Format::Csv, Output::Tree(tree)) => write_rows(&TREE_COLUMNS, tree_rows(tree)),
        (Format::Csv, Output::Report(report)) => {
            write_rows(&REPORT_COLUMNS, report.iter().map(report_row))
        }
        (Format::Html, Output::Tree(tree)) => render_table(&TREE_COLUMNS, tree_rows(tree)),
        (Format::Html, Output::Report(report)) => {
            render_table(&REPORT_COLUMNS, report.iter().map(report_row))
        }
        (Format::Executable, _) => Err(AuditError::Configuration(
            "Cannot write translations as a script".to_string(),
        )),
    }
}

fn tree_rows(tree: &Value) -> impl Iterator<Item = Vec<String>> {
    flatten(tree)
        .into_iter()
        .map(|entry| {
            let value = entry.value_text();
            vec![entry.key, value]
        })
}

/// One report row as strings, in [`REPORT_COLUMNS`] order.
pub fn report_row(entry: &ClassifiedEntry) -> Vec<String> {
    vec![
        entry.status.to_string(),
        entry.key.clone(),
        entry.value.clone(),
        entry.similar.clone().unwrap_or_default(),
        entry
            .source
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    ]
}

fn report_object(entry: &ClassifiedEntry) -> Value {
    let mut object = serde_json::Map::new();
    for (column, cell) in REPORT_COLUMNS.iter().zip(report_row(entry)) {
        object.insert(column.to_string(), Value::String(cell));
    }
    Value::Object(object)
}
