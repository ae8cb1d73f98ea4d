use std::process::ExitCode;

/// Exit status for `lexi` commands.
///
/// - `Success` (0): the command ran and its check passed
/// - `Failure` (1): the command ran but its check failed
/// - `Error` (2): the command could not run
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
