use crate::{cli::args::OutputFormat, runner::CheckReport};

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    pub report: CheckReport,
    pub format: OutputFormat,
    /// Number of files in the snapshot.
    pub files_checked: usize,
    /// Number of locale catalogs (schema files excluded).
    pub locale_files_checked: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: String,
}

/// Result of running a theme-check command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
}
