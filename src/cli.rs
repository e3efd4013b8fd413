use crate::output::OutputFormat;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::record::EntityKind;

#[derive(Parser, Debug)]
#[command(name = "labstats")]
#[command(about = "Metric normalization and tier classification for laboratory reports", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Report to generate
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportTarget {
    Services,
    Exams,
    Doctors,
    Patients,
}

impl From<ReportTarget> for EntityKind {
    fn from(target: ReportTarget) -> Self {
        match target {
            ReportTarget::Services => EntityKind::Service,
            ReportTarget::Exams => EntityKind::Exam,
            ReportTarget::Doctors => EntityKind::Doctor,
            ReportTarget::Patients => EntityKind::Patient,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a report from a JSON collection of pre-aggregated records
    Report {
        /// Which report to build
        #[arg(value_enum)]
        target: ReportTarget,

        /// JSON input: an array of records or {"data": [...]}; `-` reads stdin
        input: PathBuf,

        /// Output format (defaults to the config's `output.default_format`)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rows in the Top-N section
        #[arg(long = "top", visible_alias = "head", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        top: Option<usize>,

        /// Pad the Top-N section to exactly N rows
        #[arg(long, overrides_with = "no_pad")]
        pad: bool,

        /// Never pad the Top-N section
        #[arg(long = "no-pad", overrides_with = "pad")]
        no_pad: bool,

        /// Decimal places for percentages and ratios (0-4)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=4))]
        precision: Option<u8>,

        /// Configuration file (skips .labstats.toml discovery)
        #[arg(short, long, env = "LABSTATS_CONFIG")]
        config: Option<PathBuf>,

        /// Date used for derived ages, YYYY-MM-DD (defaults to today)
        #[arg(long = "reference-date")]
        reference_date: Option<NaiveDate>,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,

        /// Plain output: no colors
        #[arg(long)]
        plain: bool,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Report { verbosity, .. } => *verbosity,
            Commands::Init { .. } => 0,
        }
    }
}

/// Resolve `--pad` / `--no-pad`; `None` keeps the config value.
pub fn pad_override(pad: bool, no_pad: bool) -> Option<bool> {
    match (pad, no_pad) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report_command() {
        let cli = Cli::try_parse_from([
            "labstats",
            "report",
            "doctors",
            "medicos.json",
            "-f",
            "json",
            "--top",
            "5",
            "--pad",
            "--precision",
            "2",
            "--reference-date",
            "2024-01-31",
            "-vv",
        ])
        .unwrap();

        match cli.command {
            Commands::Report {
                target,
                format,
                top,
                pad,
                no_pad,
                precision,
                reference_date,
                verbosity,
                ..
            } => {
                assert_eq!(EntityKind::from(target), EntityKind::Doctor);
                assert_eq!(format, Some(OutputFormat::Json));
                assert_eq!(top, Some(5));
                assert_eq!(pad_override(pad, no_pad), Some(true));
                assert_eq!(precision, Some(2));
                assert_eq!(reference_date, NaiveDate::from_ymd_opt(2024, 1, 31));
                assert_eq!(verbosity, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_precision_out_of_range_is_rejected() {
        let result = Cli::try_parse_from(["labstats", "report", "exams", "x.json", "--precision", "9"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_top_is_rejected() {
        let result = Cli::try_parse_from(["labstats", "report", "services", "x.json", "--top", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_last_pad_flag_wins() {
        let cli = Cli::try_parse_from(["labstats", "report", "exams", "x.json", "--pad", "--no-pad"])
            .unwrap();
        match cli.command {
            Commands::Report { pad, no_pad, .. } => {
                assert_eq!(pad_override(pad, no_pad), Some(false));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
