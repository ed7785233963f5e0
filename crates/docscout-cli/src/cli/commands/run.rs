//! `docscout run` – the full search, crawl and verify pipeline.

use anyhow::Result;
use docscout_core::config::ScoutConfig;
use docscout_core::pipeline;
use docscout_core::report::ScoutReport;
use std::io::{self, Write};
use std::process::ExitCode;

/// Exit status when `--fail-if-empty` is set and nothing verified.
pub const EXIT_EMPTY: u8 = 2;

/// How a finished run turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// At least one link verified.
    Found,
    /// Nothing verified, but some requests got answers.
    Empty,
    /// Nothing verified and every request failed.
    AllFailed,
}

impl RunStatus {
    pub fn of(report: &ScoutReport) -> Self {
        let stats = &report.stats;
        if !report.verified.is_empty() {
            RunStatus::Found
        } else if stats.requests() > 0 && stats.unreachable() == stats.requests() {
            RunStatus::AllFailed
        } else {
            RunStatus::Empty
        }
    }

    /// Process exit status. Empty runs still exit 0 unless `fail_if_empty` is set.
    pub fn exit_code(self, fail_if_empty: bool) -> u8 {
        match self {
            RunStatus::Found => 0,
            RunStatus::Empty | RunStatus::AllFailed if fail_if_empty => EXIT_EMPTY,
            RunStatus::Empty | RunStatus::AllFailed => 0,
        }
    }
}

/// Logs the end-of-run summary and returns the exit status for `report`.
pub fn finish(report: &ScoutReport, fail_if_empty: bool) -> u8 {
    tracing::info!(
        result_pages = report.result_pages.len(),
        candidate_pages = report.candidate_pages,
        downloads = report.download_candidates.len(),
        verified = report.verified.len(),
        requests = report.stats.requests(),
        unreachable = report.stats.unreachable(),
        "run complete"
    );

    let status = RunStatus::of(report);
    match status {
        RunStatus::Found => {}
        RunStatus::Empty => tracing::warn!("no verified links found"),
        RunStatus::AllFailed => tracing::warn!("every request failed; check connectivity"),
    }
    status.exit_code(fail_if_empty)
}

pub fn run_pipeline(cfg: &ScoutConfig, fail_if_empty: bool) -> Result<ExitCode> {
    let report = pipeline::run_with_defaults(cfg);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for url in &report.verified {
        writeln!(out, "{}", url)?;
    }
    out.flush()?;

    Ok(ExitCode::from(finish(&report, fail_if_empty)))
}
