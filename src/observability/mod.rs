//! Logging setup and report context tracking.
//!
//! The binary installs an `env_logger` backend sized by the `-v` count;
//! the library only talks to the `log` facade. Context guards record the
//! current phase and section so warnings can say where they came from.
//!
//! ```ignore
//! use labstats::observability::{set_phase, ReportPhase};
//!
//! let _phase = set_phase(ReportPhase::Normalizing);
//! // warnings emitted here are prefixed with "normalizing"
//! ```

pub mod context;

pub use context::{
    current_phase_label, get_current_context, reset_context, set_phase, set_section,
    ContextGuard, ReportContextSnapshot, ReportPhase,
};

/// Map a `-v` count to a log level filter.
pub fn level_for_verbosity(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Install the process-wide logger. `RUST_LOG` overrides the verbosity level.
pub fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for_verbosity(verbosity))
        .format_module_path(false)
        .parse_default_env();
    // A second init (e.g. in tests) keeps the first logger.
    let _ = builder.try_init();
}
