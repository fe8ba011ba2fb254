use std::process::ExitCode;

use clap::Parser as _;

use dotskel_cli::cli::{self, Command};
use dotskel_cli::logging::Logger;
use dotskel_cli::{commands, logging};

#[allow(clippy::print_stdout)]
fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    match args.command {
        Command::Version => {
            let version = option_env!("DOTSKEL_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("dotskel {version}");
            ExitCode::SUCCESS
        }
        Command::Completions(ref opts) => {
            commands::completions::run(opts);
            ExitCode::SUCCESS
        }
        Command::Apply(ref opts) => {
            logging::init_subscriber(args.verbose, "apply");
            let log = Logger::new("apply");
            finish(&log, commands::apply::run(&args.global, opts, &log))
        }
        Command::Diff(ref opts) => {
            logging::init_subscriber(args.verbose, "diff");
            let log = Logger::new("diff");
            finish(&log, commands::diff::run(&args.global, opts, &log))
        }
    }
}

fn finish(log: &Logger, result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
