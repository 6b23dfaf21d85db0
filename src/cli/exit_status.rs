use std::process::ExitCode;

use super::commands::{CommandResult, CommandSummary};
use crate::offense::Severity;

/// Exit status for CLI commands, following common conventions for linter tools.
///
/// - `Success` (0): Command completed successfully, no offenses found
/// - `Failure` (1): Command completed but found offenses (errors/warnings)
/// - `Error` (2): Command failed (config error, failed check, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed successfully, no offenses found.
    Success,
    /// Command completed but found offenses (errors/warnings).
    Failure,
    /// Command failed due to internal error (config error, failed check, etc.).
    Error,
}

impl ExitStatus {
    /// Info-level offenses alone never fail a run.
    pub fn from_result(result: &CommandResult) -> Self {
        let CommandSummary::Check(summary) = &result.summary else {
            return ExitStatus::Success;
        };
        let report = &summary.report;
        if !report.failures.is_empty() {
            ExitStatus::Error
        } else if report.count(Severity::Error) + report.count(Severity::Warning) > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
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
