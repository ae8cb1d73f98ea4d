use std::process::ExitCode;

use clap::Parser;
use lexi::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let Some(args) = Arguments::parse().with_command_or_help() else {
        return ExitStatus::Success.into();
    };

    if let Err(err) = lexi::logging::init(args.verbose()) {
        eprintln!("Error: {}", err);
        return ExitStatus::Error.into();
    }

    match lexi::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
