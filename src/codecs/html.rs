use askama::Template;

use crate::error::{AuditError, Result};

/// Standalone report page, see `templates/report.html`.
#[derive(Template)]
#[template(path = "report.html")]
struct TableTemplate<'a> {
    header: &'a [&'a str],
    rows: Vec<Vec<String>>,
}

/// A standalone HTML page holding one table of `rows` under `header`.
pub fn render_table<I>(header: &[&str], rows: I) -> Result<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    TableTemplate {
        header,
        rows: rows.into_iter().collect(),
    }
    .render()
    .map_err(|e| AuditError::Output(format!("Failed to render HTML: {}", e)))
}
