//! Offense types reported by checks.
//!
//! An offense is a finding tied to one file of the theme. Range and
//! diagnostic enrichment happens in whatever consumes these records
//! (editor client, CLI reporter).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity level of an offense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A finding produced by a check.
///
/// Ordering is by path, then message, so sorted output is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offense {
    /// Absolute theme path of the offending file, e.g. `/locales/fr.json`.
    pub absolute_path: String,
    pub message: String,
    /// Name of the check that reported it.
    pub check: String,
    pub severity: Severity,
    /// Translation key the offense is about, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// 1-based line in the offending file, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Offense {
    pub fn new(
        check: impl Into<String>,
        severity: Severity,
        absolute_path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            absolute_path: absolute_path.into(),
            message: message.into(),
            check: check.into(),
            severity,
            key: None,
            line: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }
}

impl Ord for Offense {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.absolute_path
            .cmp(&other.absolute_path)
            .then_with(|| self.message.cmp(&other.message))
            .then_with(|| self.check.cmp(&other.check))
            .then_with(|| self.severity.cmp(&other.severity))
            .then_with(|| self.key.cmp(&other.key))
            .then_with(|| self.line.cmp(&other.line))
    }
}

impl PartialOrd for Offense {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Offense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.severity, self.absolute_path, self.check, self.message
        )
    }
}
