//! Project root discovery.
//!
//! A theme root is the nearest directory, walking upward from a file or
//! directory, that holds either a `.git` entry or a `.theme-check.yml`
//! file. The walk stops at the first match, so a nested configuration
//! shadows any configuration further up the tree.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use tracing::debug;
use url::Url;

use crate::config::CONFIG_FILE_NAME;

/// Directory entry marking the top of a git checkout.
pub const GIT_MARKER: &str = ".git";

/// Markers checked at each level, in order.
pub const ROOT_MARKERS: &[&str] = &[GIT_MARKER, CONFIG_FILE_NAME];

/// Returns true if anything (file, directory, symlink target) exists at `path`.
///
/// Only "does not exist" maps to `false`; every other I/O failure is returned
/// to the caller.
pub fn file_exists(path: impl AsRef<Path>) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Returns the first marker present directly inside `dir`, if any.
pub fn marker_in(dir: &Path) -> io::Result<Option<&'static str>> {
    for marker in ROOT_MARKERS {
        if file_exists(dir.join(marker))? {
            return Ok(Some(marker));
        }
    }
    Ok(None)
}

/// Finds the directory containing the nearest root marker.
///
/// If `start` names a file, the search begins at its parent directory.
/// When no marker exists anywhere up to the filesystem root, `start` itself
/// is returned so standalone directories still work.
pub fn find_root(start: impl AsRef<Path>) -> Result<PathBuf> {
    let start = std::path::absolute(start.as_ref())
        .with_context(|| format!("Failed to resolve path: {:?}", start.as_ref()))?;

    let start_dir = if start.is_dir() {
        start.as_path()
    } else {
        start.parent().unwrap_or(&start)
    };

    for dir in start_dir.ancestors() {
        let marker = marker_in(dir)
            .with_context(|| format!("Failed to inspect directory: {:?}", dir))?;
        if let Some(marker) = marker {
            debug!(root = %dir.display(), marker, "found theme root");
            return Ok(dir.to_path_buf());
        }
    }

    debug!(start = %start.display(), "no root marker found, using start location");
    Ok(start)
}

/// URI flavour of [`find_root`] for editor integrations.
pub fn find_root_uri(uri: &Url) -> Result<Url> {
    let path = uri
        .to_file_path()
        .map_err(|_| anyhow!("Not a file URI: {}", uri))?;
    let root = find_root(&path)?;
    Url::from_file_path(&root).map_err(|_| anyhow!("Cannot convert {:?} to a URI", root))
}
