use std::process::ExitCode;

/// Process exit status of the CLI.
///
/// - `Success` (0): the output was produced and written
/// - `Error` (2): nothing was written (bad options, unreadable input, search
///   or translation failure)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
