//! CLI command implementations for labstats.
//!
//! Available commands:
//! - **report**: Build a services, exams, doctors or patients report
//! - **init**: Initialize a new labstats configuration file

pub mod init;
pub mod report;

pub use init::init_config;
pub use report::{run_report, ReportConfig};
