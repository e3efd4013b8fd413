use crate::report::Report;
use anyhow::Result;

/// Pretty-printed JSON. Cells serialize as plain scalars.
pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
