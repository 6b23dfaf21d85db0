//! Path normalization helpers.
//!
//! Every path that crosses a module boundary is normalized to forward
//! slashes so comparisons never depend on the host separator.

use std::path::{Component, Path, PathBuf};

/// Converts a path to a string using `/` as the only separator.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use theme_check::core::path::normalize_separators;
///
/// assert_eq!(normalize_separators(Path::new("a/b/c.json")), "a/b/c.json");
/// assert_eq!(normalize_separators(Path::new(r"C:\theme\locales")), "C:/theme/locales");
/// ```
pub fn normalize_separators(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Resolves `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above the root or a prefix.
pub fn resolve_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = match out.components().next_back() {
                    Some(Component::Normal(_)) => out.pop(),
                    Some(Component::RootDir | Component::Prefix(_)) => true,
                    _ => false,
                };
                if !popped {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Normalizes a snapshot key: forward slashes, no leading separator.
pub fn relative_key(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_string()
}

/// The path an offense reports for a snapshot key (always with a leading `/`).
pub fn absolute_offense_path(relative: &str) -> String {
    format!("/{}", relative_key(relative))
}
