//! `docscout config` – print the effective configuration.

use anyhow::Result;
use docscout_core::config::ScoutConfig;
use std::process::ExitCode;

pub fn run_print_config(cfg: &ScoutConfig) -> Result<ExitCode> {
    print!("{}", cfg.to_toml()?);
    Ok(ExitCode::SUCCESS)
}
