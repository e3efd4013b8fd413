use crate::config::{load_config, load_config_from_path, LabstatsConfig};
use crate::diagnostics::LogSink;
use crate::formatting::FormattingConfig;
use crate::io;
use crate::metrics::{Precision, PrecisionPolicy};
use crate::observability::{set_phase, ReportPhase};
use crate::output::{self, OutputFormat};
use crate::record::EntityKind;
use crate::report::{generate_report, Report, ReportSettings};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Parameters of one `labstats report` invocation.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub kind: EntityKind,
    pub input: PathBuf,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub top: Option<usize>,
    pub pad: Option<bool>,
    pub precision: Option<u8>,
    pub config: Option<PathBuf>,
    pub reference_date: Option<NaiveDate>,
    pub plain: bool,
}

impl ReportConfig {
    pub fn new(kind: EntityKind, input: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            input: input.into(),
            format: None,
            output: None,
            top: None,
            pad: None,
            precision: None,
            config: None,
            reference_date: None,
            plain: false,
        }
    }

    fn load_config(&self) -> Result<LabstatsConfig> {
        match &self.config {
            Some(path) => Ok(load_config_from_path(path)?),
            None => Ok(load_config()),
        }
    }

    /// Apply command-line overrides on top of the file config.
    pub fn settings(&self, config: LabstatsConfig) -> Result<ReportSettings> {
        let reference_date = self
            .reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let mut settings = ReportSettings::from_config(config, self.kind, reference_date);

        if let Some(decimals) = self.precision {
            let precision = Precision::new(decimals)?;
            settings.precision = PrecisionPolicy {
                percentage: precision,
                ratio: precision,
            };
        }
        if let Some(limit) = self.top {
            settings.top.limit = limit;
        }
        if let Some(pad) = self.pad {
            settings.top.pad = pad;
        }
        Ok(settings)
    }
}

/// Build the report described by `config`.
pub fn build(config: &ReportConfig, file_config: LabstatsConfig) -> Result<Report> {
    let settings = config.settings(file_config)?;
    let document = {
        let _phase = set_phase(ReportPhase::Loading);
        io::read_json(&config.input)?
    };
    let report = generate_report(config.kind, &document, &settings, &LogSink)
        .with_context(|| format!("Cannot build {} report from {}", config.kind, config.input.display()))?;
    Ok(report)
}

pub fn run_report(config: ReportConfig) -> Result<()> {
    let file_config = config.load_config()?;
    let format = config.format.unwrap_or(file_config.output.default_format);
    let formatting = if config.plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    };

    let report = build(&config, file_config)?;
    log::info!(
        "Built {} report with {} sections",
        report.kind,
        report.sections.len()
    );
    output::write_report(&report, format, config.output.as_deref(), formatting)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::reference_date;
    use indoc::indoc;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("input.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let mut config = ReportConfig::new(EntityKind::Service, "x.json");
        config.top = Some(3);
        config.pad = Some(false);
        config.precision = Some(2);
        config.reference_date = Some(reference_date());

        let settings = config.settings(LabstatsConfig::default()).unwrap();
        assert_eq!(settings.top.limit, 3);
        assert!(!settings.top.pad);
        assert_eq!(settings.precision.percentage, Precision::TWO);
        assert_eq!(settings.precision.ratio, Precision::TWO);
        assert_eq!(settings.reference_date, reference_date());
    }

    #[test]
    fn test_build_from_file() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            indoc! {r#"
                [
                    {"nombre": "A", "total_solicitudes": 30},
                    {"nombre": "B", "total_solicitudes": 10},
                    {"nombre": "C", "total_solicitudes": 0}
                ]
            "#},
        );
        let mut config = ReportConfig::new(EntityKind::Service, input);
        config.reference_date = Some(reference_date());

        let report = build(&config, LabstatsConfig::default()).unwrap();
        let top = report.section("Top 10 Servicios").unwrap();
        assert_eq!(top.rows.len(), 10);
    }

    #[test]
    fn test_structurally_invalid_input_fails() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, r#"{"rows": []}"#);
        let config = ReportConfig::new(EntityKind::Exam, input);

        let err = build(&config, LabstatsConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid input"));
    }
}
