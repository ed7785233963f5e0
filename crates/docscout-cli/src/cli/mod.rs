//! CLI for the docscout document link finder.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use docscout_core::config::{self, ScoutConfig};
use docscout_core::logging;
use std::path::PathBuf;
use std::process::ExitCode;

use commands::{run_pipeline, run_print_config, run_probe};

/// Top-level CLI. With no subcommand, behaves like `docscout run`.
#[derive(Debug, Parser)]
#[command(name = "docscout")]
#[command(about = "docscout: find and verify downloadable documents on allow-listed sites", long_about = None)]
pub struct Cli {
    /// Read configuration from this TOML file instead of ~/.config/docscout/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append logs to ~/.local/state/docscout/docscout.log instead of stderr.
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Search, crawl and verify; print verified URLs one per line.
    Run {
        /// Exit with status 2 when no link could be verified.
        #[arg(long)]
        fail_if_empty: bool,
    },

    /// Probe URLs with the verifier and print a verdict for each.
    Probe {
        /// URLs to probe.
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Print the effective configuration as TOML.
    Config,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn init_logging(&self) {
        if !self.log_file {
            logging::init_logging_stderr();
            return;
        }
        if let Err(err) = logging::init_logging_file() {
            logging::init_logging_stderr();
            tracing::warn!("file logging unavailable ({:#}), logging to stderr", err);
        }
    }

    fn load_config(&self) -> Result<ScoutConfig> {
        let cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_default()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        Ok(cfg)
    }

    pub fn run(&self) -> Result<ExitCode> {
        let cfg = self.load_config()?;

        match &self.command {
            None => run_pipeline(&cfg, false),
            Some(CliCommand::Run { fail_if_empty }) => run_pipeline(&cfg, *fail_if_empty),
            Some(CliCommand::Probe { urls }) => run_probe(&cfg, urls),
            Some(CliCommand::Config) => run_print_config(&cfg),
        }
    }
}

#[cfg(test)]
mod tests;
