//! Check implementations.
//!
//! Every check implements [`Check`]: given the project snapshot and the
//! shared [`CheckContext`], it produces offenses. Checks are held by the
//! runner as a list of trait objects.
//!
//! ## Module Structure
//!
//! - `matching_translations`: structural diff of locale catalogs against the default catalog

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::{
    config::Config,
    core::{LocaleContext, ProjectSnapshot},
    offense::{Offense, Severity},
};

pub mod matching_translations;

pub use matching_translations::MatchingTranslations;

#[async_trait]
pub trait Check: Send + Sync {
    /// Name used in offenses and as the config key for this check's settings.
    fn name(&self) -> &str;

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    async fn check(&self, snapshot: &ProjectSnapshot, ctx: &CheckContext) -> Result<Vec<Offense>>;
}

/// Read-only, document-independent context shared by all checks of a run.
#[derive(Debug, Clone)]
pub struct CheckContext {
    pub config: Config,
    pub locale: Arc<LocaleContext>,
}

impl CheckContext {
    pub fn new(config: Config, locale: Arc<LocaleContext>) -> Self {
        Self { config, locale }
    }

    /// Context derived entirely from a snapshot, rooted at `/`.
    pub fn from_snapshot(snapshot: &ProjectSnapshot) -> Result<Self> {
        Ok(Self::new(
            Config::for_root("/"),
            Arc::new(LocaleContext::from_snapshot(snapshot)?),
        ))
    }

    pub fn default_locale(&self) -> Option<&str> {
        self.locale.default_locale.as_deref()
    }

    pub fn default_translations(&self) -> Option<&Value> {
        self.locale.default_translations.as_ref()
    }

    /// Severity a check reports at, after config overrides.
    pub fn severity_for(&self, check: &dyn Check) -> Severity {
        self.config
            .check_settings(check.name())
            .severity
            .unwrap_or_else(|| check.default_severity())
    }
}

/// All built-in checks, in registration order.
pub fn all_checks() -> Vec<Box<dyn Check>> {
    vec![Box::new(MatchingTranslations)]
}
