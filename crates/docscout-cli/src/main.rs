use std::process::ExitCode;

mod cli;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Logging before anything touches the network or the config file.
    cli.init_logging();

    match cli.run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("docscout error: {:#}", err);
            ExitCode::from(1)
        }
    }
}
