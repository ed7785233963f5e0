//! CLI command handlers, one per file.

mod config;
mod probe;
mod run;

pub use config::run_print_config;
pub use probe::run_probe;
pub use run::run_pipeline;

#[cfg(test)]
pub use probe::{verdict_line, EXIT_REJECTED};
#[cfg(test)]
pub use run::{finish, RunStatus, EXIT_EMPTY};
