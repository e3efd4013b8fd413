use anyhow::Result;
use clap::Parser;
use labstats::cli::{pad_override, Cli, Commands};
use labstats::commands::{init_config, run_report, ReportConfig};
use labstats::observability::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Report {
            target,
            input,
            format,
            output,
            top,
            pad,
            no_pad,
            precision,
            config,
            reference_date,
            verbosity: _,
            plain,
        } => {
            let report_config = ReportConfig {
                kind: target.into(),
                input,
                format,
                output,
                top,
                pad: pad_override(pad, no_pad),
                precision,
                config,
                reference_date,
                plain,
            };
            run_report(report_config)
        }
        Commands::Init { force } => init_config(force),
    }
}
