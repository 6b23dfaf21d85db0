//! Report formatting and printing utilities.
//!
//! Offenses are displayed in cargo-style format. Separate from core logic to
//! allow theme-check to be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::{
    args::OutputFormat,
    commands::{CheckSummary, CommandResult, CommandSummary, InitSummary},
};
use crate::{
    offense::{Offense, Severity},
    runner::{CheckFailure, CheckReport},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a check report to a custom writer.
///
/// Offenses are sorted by path then message; the runner makes no ordering
/// promise across checks.
pub fn report_to<W: Write>(report: &CheckReport, writer: &mut W) {
    let mut sorted = report.offenses.clone();
    sorted.sort();

    for offense in &sorted {
        print_offense(offense, writer);
    }
    for failure in &report.failures {
        print_failure(failure, writer);
    }

    print_summary(report, writer);
}

/// Print a check report as pretty JSON.
pub fn report_json_to<W: Write>(report: &CheckReport, writer: &mut W) -> serde_json::Result<()> {
    let mut sorted = report.clone();
    sorted.offenses.sort();
    serde_json::to_writer_pretty(&mut *writer, &sorted)?;
    let _ = writeln!(writer);
    Ok(())
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(files: usize, locale_files: usize, writer: &mut W) {
    let msg = format!(
        "Checked {} {}, {} locale {} - no offenses found",
        files,
        if files == 1 { "file" } else { "files" },
        locale_files,
        if locale_files == 1 { "file" } else { "files" }
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Check(summary) => print_check(summary, &mut io::stdout().lock()),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_check<W: Write>(summary: &CheckSummary, writer: &mut W) {
    match summary.format {
        OutputFormat::Json => {
            if let Err(e) = report_json_to(&summary.report, writer) {
                eprintln!("{} could not serialize report: {}", "error:".bold().red(), e);
            }
        }
        OutputFormat::Text if summary.report.is_clean() => {
            print_success_to(summary.files_checked, summary.locale_files_checked, writer);
        }
        OutputFormat::Text => report_to(&summary.report, writer),
    }
}

fn severity_label(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
        Severity::Info => "info".bold().cyan(),
    }
}

fn print_offense<W: Write>(offense: &Offense, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_label(offense.severity),
        offense.message,
        offense.check.dimmed().cyan()
    );

    match offense.line {
        Some(line) => {
            let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), offense.absolute_path, line);
        }
        None => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), offense.absolute_path);
        }
    }

    if let Some(key) = &offense.key {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "key:".bold(), key);
    }

    let _ = writeln!(writer);
}

fn print_failure<W: Write>(failure: &CheckFailure, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{}: check '{}' failed: {}",
        "error".bold().red(),
        failure.check,
        failure.error
    );
    let _ = writeln!(writer);
}

fn print_summary<W: Write>(report: &CheckReport, writer: &mut W) {
    let errors = report.count(Severity::Error);
    let warnings = report.count(Severity::Warning);
    let problems = report.offenses.len();

    if problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            problems,
            if problems == 1 { "problem" } else { "problems" },
            errors,
            if errors == 1 { "error" } else { "errors" }.red(),
            warnings,
            if warnings == 1 { "warning" } else { "warnings" }.yellow()
        );
    }
    if !report.failures.is_empty() {
        let _ = writeln!(
            writer,
            "{} {} {} could not complete",
            FAILURE_MARK.red(),
            report.failures.len(),
            if report.failures.len() == 1 { "check" } else { "checks" }
        );
    }
}

fn print_init(summary: &InitSummary) {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path).green()
    );
}

// ============================================================
// Tests
// ============================================================
