//! `docscout probe <url>...` – run the verifier on given URLs.

use anyhow::Result;
use docscout_core::config::ScoutConfig;
use docscout_core::fetch::CurlFetcher;
use docscout_core::verify::{Verdict, Verifier};
use std::io::{self, Write};
use std::process::ExitCode;

/// Exit status when at least one URL was rejected.
pub const EXIT_REJECTED: u8 = 2;

/// One output line: `ok\t<url>` or `rejected\t<url>\t<reason>`.
pub fn verdict_line(url: &str, verdict: &Verdict) -> String {
    match verdict {
        Verdict::Accepted => format!("ok\t{}", url),
        Verdict::Rejected(reason) => format!("rejected\t{}\t{}", url, reason),
    }
}

pub fn run_probe(cfg: &ScoutConfig, urls: &[String]) -> Result<ExitCode> {
    let fetcher = CurlFetcher::from_config(cfg);
    let verifier = Verifier::new(cfg, &fetcher);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_ok = true;
    for url in urls {
        let verdict = verifier.check(url);
        all_ok &= verdict.is_accepted();
        writeln!(out, "{}", verdict_line(url, &verdict))?;
    }
    out.flush()?;

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_REJECTED)
    })
}
