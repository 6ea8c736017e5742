//! Comma-separated rows with a header line.

use crate::core::FlatEntry;
use crate::error::{AuditError, Result};

/// Read `key,value` rows. Column order follows the header; other columns are
/// ignored and a missing `value` cell reads as empty.
pub fn parse_rows(content: &str) -> std::result::Result<Vec<FlatEntry>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("Invalid CSV header ({})", e))?
        .clone();
    let column = |name: &str| headers.iter().position(|header| header.trim() == name);
    let key_column = column("key").ok_or("CSV input has no 'key' column")?;
    let value_column = column("value").ok_or("CSV input has no 'value' column")?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| format!("Invalid CSV row ({})", e))?;
        let Some(key) = record.get(key_column) else {
            continue;
        };
        let value = record.get(value_column).unwrap_or_default();
        entries.push(FlatEntry::new(key, value));
    }
    Ok(entries)
}

/// Write `header` followed by `rows`, quoting cells only where needed.
pub fn write_rows<I>(header: &[&str], rows: I) -> Result<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header).map_err(csv_error)?;
    for row in rows {
        writer.write_record(&row).map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AuditError::Output(format!("Failed to write CSV: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| AuditError::Output(format!("Failed to write CSV: {}", e)))
}

fn csv_error(error: csv::Error) -> AuditError {
    AuditError::Output(format!("Failed to write CSV: {}", error))
}
