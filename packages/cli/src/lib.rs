// ABOUTME: Library side of the daylog command line tool
// ABOUTME: Configuration resolution, error taxonomy and the report pipeline

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::{CliOptions, ConfigError, RunConfig, Settings};
pub use error::DaylogError;
pub use pipeline::{execute, run};
