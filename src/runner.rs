//! Check execution.
//!
//! The runner executes every enabled check against one snapshot and one
//! context, waits for all of them, and aggregates the result. A check that
//! fails or panics is recorded as a [`CheckFailure`]; the other checks still
//! run and contribute their offenses.

use std::{any::Any, panic::AssertUnwindSafe};

use anyhow::Result;
use futures_util::{FutureExt, future::join_all};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    checks::{Check, CheckContext},
    core::ProjectSnapshot,
    offense::{Offense, Severity},
};

/// A check that could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckFailure {
    pub check: String,
    pub error: String,
}

/// Aggregated outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Offenses of all checks, concatenated in registration order.
    pub offenses: Vec<Offense>,
    pub failures: Vec<CheckFailure>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.offenses.is_empty() && self.failures.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.offenses
            .iter()
            .filter(|o| o.severity == severity)
            .count()
    }
}

/// Runs `checks` concurrently and waits for all of them.
pub async fn check(
    snapshot: &ProjectSnapshot,
    checks: &[Box<dyn Check>],
    ctx: &CheckContext,
) -> CheckReport {
    let enabled: Vec<&dyn Check> = checks
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| {
            let enabled = ctx.config.is_enabled(c.name());
            if !enabled {
                debug!(check = c.name(), "disabled by config");
            }
            enabled
        })
        .collect();

    let outcomes = join_all(enabled.iter().map(|check| async move {
        let outcome = AssertUnwindSafe(check.check(snapshot, ctx))
            .catch_unwind()
            .await;
        (*check, outcome)
    }))
    .await;

    let mut report = CheckReport::default();
    for (check, outcome) in outcomes {
        match outcome {
            Ok(Ok(mut offenses)) => {
                debug!(check = check.name(), offenses = offenses.len(), "check finished");
                report.offenses.append(&mut offenses);
            }
            Ok(Err(err)) => {
                warn!(check = check.name(), "check failed: {:#}", err);
                report.failures.push(CheckFailure {
                    check: check.name().to_string(),
                    error: format!("{:#}", err),
                });
            }
            Err(payload) => {
                let error = panic_message(payload.as_ref());
                warn!(check = check.name(), "check panicked: {}", error);
                report.failures.push(CheckFailure {
                    check: check.name().to_string(),
                    error,
                });
            }
        }
    }

    info!(
        checks = enabled.len(),
        offenses = report.offenses.len(),
        failures = report.failures.len(),
        "run complete"
    );
    report
}

/// Blocking wrapper around [`check`] for callers without a runtime.
pub fn check_blocking(
    snapshot: &ProjectSnapshot,
    checks: &[Box<dyn Check>],
    ctx: &CheckContext,
) -> Result<CheckReport> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(check(snapshot, checks, ctx)))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::bail;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        checks::MatchingTranslations,
        config::{CheckSettings, Config},
    };

    struct Failing;

    #[async_trait]
    impl Check for Failing {
        fn name(&self) -> &str {
            "Failing"
        }

        async fn check(&self, _: &ProjectSnapshot, _: &CheckContext) -> Result<Vec<Offense>> {
            bail!("boom")
        }
    }

    struct Panicking;

    #[async_trait]
    impl Check for Panicking {
        fn name(&self) -> &str {
            "Panicking"
        }

        async fn check(&self, _: &ProjectSnapshot, _: &CheckContext) -> Result<Vec<Offense>> {
            panic!("kaboom")
        }
    }

    struct Fixed(&'static str);

    #[async_trait]
    impl Check for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        fn default_severity(&self) -> Severity {
            Severity::Info
        }

        async fn check(&self, _: &ProjectSnapshot, ctx: &CheckContext) -> Result<Vec<Offense>> {
            tokio::task::yield_now().await;
            Ok(vec![Offense::new(
                self.0,
                ctx.severity_for(self),
                "/layout/theme.liquid",
                format!("from {}", self.0),
            )])
        }
    }

    fn snapshot() -> ProjectSnapshot {
        ProjectSnapshot::from_iter([
            ("locales/en.default.json", r#"{"hello": "Hello", "world": "World"}"#),
            ("locales/pt-BR.json", r#"{"hello": "Olá"}"#),
        ])
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_siblings() {
        let snapshot = snapshot();
        let ctx = CheckContext::from_snapshot(&snapshot).unwrap();
        let checks: Vec<Box<dyn Check>> = vec![
            Box::new(Failing),
            Box::new(MatchingTranslations),
            Box::new(Panicking),
        ];

        let report = check(&snapshot, &checks, &ctx).await;

        assert_eq!(report.offenses.len(), 1);
        assert_eq!(report.offenses[0].message, "The translation for 'world' is missing");
        assert_eq!(
            report.failures,
            vec![
                CheckFailure {
                    check: "Failing".to_string(),
                    error: "boom".to_string(),
                },
                CheckFailure {
                    check: "Panicking".to_string(),
                    error: "panicked: kaboom".to_string(),
                },
            ]
        );
        assert!(!report.is_clean());
    }

    #[tokio::test]
    async fn test_offenses_follow_registration_order() {
        let snapshot = snapshot();
        let ctx = CheckContext::from_snapshot(&snapshot).unwrap();
        let checks: Vec<Box<dyn Check>> =
            vec![Box::new(Fixed("B")), Box::new(Fixed("A")), Box::new(Fixed("C"))];

        let report = check(&snapshot, &checks, &ctx).await;

        let order: Vec<_> = report.offenses.iter().map(|o| o.check.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
        assert_eq!(report.count(Severity::Info), 3);
    }

    #[tokio::test]
    async fn test_disabled_checks_are_skipped() {
        let snapshot = snapshot();
        let mut config = Config::for_root("/");
        config.checks.insert(
            "MatchingTranslations".to_string(),
            CheckSettings {
                enabled: false,
                severity: None,
            },
        );
        let ctx = CheckContext::new(config, Default::default());
        let checks: Vec<Box<dyn Check>> = vec![Box::new(MatchingTranslations)];

        let report = check(&snapshot, &checks, &ctx).await;
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_no_default_yields_empty_report() {
        let snapshot = ProjectSnapshot::from_iter([
            ("locales/en.json", r#"{"hello": "Hello"}"#),
            ("locales/pt-BR.json", r#"{"world": "Mundo"}"#),
        ]);
        let ctx = CheckContext::from_snapshot(&snapshot).unwrap();

        let report = check(&snapshot, &crate::checks::all_checks(), &ctx).await;
        assert!(report.is_clean());
    }

    #[test]
    fn test_check_blocking() {
        let snapshot = snapshot();
        let ctx = CheckContext::from_snapshot(&snapshot).unwrap();

        let report = check_blocking(&snapshot, &crate::checks::all_checks(), &ctx).unwrap();
        assert_eq!(report.count(Severity::Error), 1);
    }
}
