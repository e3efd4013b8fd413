//! Report rendering: JSON, Markdown and terminal tables.

pub mod json;
pub mod markdown;
pub mod terminal;

use crate::formatting::FormattingConfig;
use crate::io;
use crate::observability::{set_phase, ReportPhase};
use crate::report::Report;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use json::render_json;
pub use markdown::render_markdown;
pub use terminal::render_terminal;

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Terminal,
}

/// Render a report to a string.
pub fn render(report: &Report, format: OutputFormat, formatting: FormattingConfig) -> Result<String> {
    let _phase = set_phase(ReportPhase::Rendering);
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Markdown => Ok(render_markdown(report)),
        OutputFormat::Terminal => Ok(render_terminal(report, formatting)),
    }
}

/// Write a report to `output_file`, creating parent directories, or to
/// stdout. Files never get terminal colors.
pub fn write_report(
    report: &Report,
    format: OutputFormat,
    output_file: Option<&Path>,
    formatting: FormattingConfig,
) -> Result<()> {
    match output_file {
        Some(path) => {
            let format = effective_file_format(format, path);
            let content = render(report, format, FormattingConfig::plain())?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                io::ensure_dir(parent)?;
            }
            io::write_file(path, &content)?;
            log::info!("Wrote {} report to {}", report.kind, path.display());
        }
        None => {
            let content = render(report, format, formatting)?;
            println!("{content}");
        }
    }
    Ok(())
}

/// Terminal output aimed at a `.md` file becomes Markdown.
fn effective_file_format(format: OutputFormat, path: &Path) -> OutputFormat {
    if format == OutputFormat::Terminal && is_markdown_file(path) {
        OutputFormat::Markdown
    } else {
        format
    }
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}
