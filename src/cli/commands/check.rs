use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use colored::Colorize;
use tracing::warn;

use super::{CheckSummary, CommandResult, CommandSummary};
use crate::{
    checks::{CheckContext, all_checks},
    cli::args::CheckArgs,
    config::load_config,
    core::{LocaleContext, ProjectSnapshot},
    runner,
};

pub fn check(args: &CheckArgs) -> Result<CommandResult> {
    let start = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    let config = load_config(&start)?;

    let loaded = ProjectSnapshot::load_for(&config)?;
    if loaded.skipped_count > 0 {
        eprintln!(
            "{} {} path(s) skipped due to access errors{}",
            "warning:".bold().yellow(),
            loaded.skipped_count,
            if args.verbose { "" } else { " (use -v for details)" }
        );
    }
    let snapshot = loaded.snapshot;

    // Derived from the snapshot so `ignore` applies to the default catalog too.
    // Multiple default files are reported by the checks themselves.
    let locale = match LocaleContext::from_snapshot(&snapshot) {
        Ok(locale) => Arc::new(locale),
        Err(e) => {
            warn!("Could not load locale context: {:#}", e);
            Arc::default()
        }
    };

    let locale_files_checked = snapshot
        .locale_files()
        .iter()
        .filter(|f| !f.is_schema())
        .count();
    let ctx = CheckContext::new(config, locale);
    let report = runner::check_blocking(&snapshot, &all_checks(), &ctx)?;

    Ok(CommandResult {
        summary: CommandSummary::Check(CheckSummary {
            report,
            format: args.format,
            files_checked: snapshot.len(),
            locale_files_checked,
        }),
    })
}
