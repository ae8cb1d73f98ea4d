use anyhow::Result;

mod args;
pub mod commands;
mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Command, ExtractArgs, VerifyArgs};
pub use exit_status::ExitStatus;

/// Run the selected command. `args` must carry a command; see
/// [`Arguments::with_command_or_help`].
pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    run::run(args)
}
