use serde_json::Value;

use crate::error::{AuditError, Result};

pub fn parse_tree(content: &str) -> std::result::Result<Value, String> {
    serde_json::from_str(content).map_err(|e| format!("Invalid JSON ({})", e))
}

/// Pretty JSON with a 2-space indent and a trailing newline.
pub fn render_tree(tree: &Value) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(tree)
        .map_err(|e| AuditError::Output(format!("Failed to serialize JSON: {}", e)))?;
    rendered.push('\n');
    Ok(rendered)
}
