//! In-memory project snapshot.
//!
//! Checks never touch the filesystem. They read a snapshot built once per
//! run, either from disk ([`ProjectSnapshot::load`]) or from in-memory
//! content supplied by an editor session.

use std::{collections::BTreeMap, fs, io, path::Path};

use anyhow::Result;
use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{
    config::Config,
    core::{
        locale::{LOCALES_DIR, LocaleFile},
        path::{normalize_separators, relative_key},
        root::GIT_MARKER,
    },
};

/// Directories never worth loading into a snapshot.
const SKIPPED_DIRS: &[&str] = &[GIT_MARKER, "node_modules"];

/// Immutable mapping from forward-slash relative path to file content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSnapshot {
    files: BTreeMap<String, String>,
}

/// Result of loading a snapshot from disk.
pub struct LoadResult {
    pub snapshot: ProjectSnapshot,
    /// Paths that could not be read (access errors).
    pub skipped_count: usize,
}

impl ProjectSnapshot {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(&relative_key(path)).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(&relative_key(path))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All files in path order.
    pub fn files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Locale files directly under `locales/`, schema files included, in path order.
    pub fn locale_files(&self) -> Vec<LocaleFile> {
        let prefix = format!("{}/", LOCALES_DIR);
        self.files
            .range(prefix.clone()..)
            .take_while(|(path, _)| path.starts_with(&prefix))
            .filter_map(|(path, _)| LocaleFile::parse(path))
            .collect()
    }

    /// Loads every UTF-8 text file under `root`, skipping ignored paths.
    ///
    /// Files that are not valid UTF-8 are left out silently; unreadable
    /// paths are counted in `skipped_count`.
    pub fn load(root: &Path, ignore: &[Pattern]) -> Result<LoadResult> {
        let mut files = BTreeMap::new();
        let mut skipped_count = 0;

        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && entry.depth() > 0
                && SKIPPED_DIRS.iter().any(|d| entry.file_name() == *d))
        });

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn!("Cannot access path: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let relative = normalize_separators(relative);
            if ignore.iter().any(|p| p.matches(&relative)) {
                debug!(path = %relative, "ignored by config");
                continue;
            }

            match fs::read_to_string(entry.path()) {
                Ok(content) => {
                    files.insert(relative, content);
                }
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    debug!(path = %relative, "skipping non-text file");
                }
                Err(e) => {
                    skipped_count += 1;
                    warn!("Cannot read {}: {}", relative, e);
                }
            }
        }

        debug!(root = %root.display(), files = files.len(), "loaded snapshot");
        Ok(LoadResult {
            snapshot: Self { files },
            skipped_count,
        })
    }

    /// Loads the snapshot of the theme described by `config`.
    pub fn load_for(config: &Config) -> Result<LoadResult> {
        let ignore = config.ignore_patterns()?;
        Self::load(&config.root_path(), &ignore)
    }
}

impl<P, C> FromIterator<(P, C)> for ProjectSnapshot
where
    P: AsRef<str>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(path, content)| (relative_key(path.as_ref()), content.into()))
                .collect(),
        }
    }
}
