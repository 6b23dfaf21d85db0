use std::path::PathBuf;

use thiserror::Error;

/// Conditions callers may want to match on after a `downcast_ref`.
#[derive(Debug, Error)]
pub enum ThemeCheckError {
    #[error("Multiple default locale files found in {root}: {}", files.join(", "))]
    MultipleDefaultLocales { root: PathBuf, files: Vec<String> },

    #[error("Invalid configuration in {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },
}
