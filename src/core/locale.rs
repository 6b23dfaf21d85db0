//! Locale files and the default-locale context of a theme.
//!
//! ## File naming
//!
//! - `locales/<tag>.json`: a translation catalog
//! - `locales/<tag>.default.json`: the default catalog (at most one per theme)
//! - `locales/<tag>.schema.json`: schema translations, never treated as a catalog
//!
//! The default locale and translations are derived from disk once per root
//! and cached in a [`LocaleContextCache`] owned by the workspace session.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, LazyLock},
};

use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::{
    core::{
        path::{normalize_separators, relative_key},
        snapshot::ProjectSnapshot,
    },
    error::ThemeCheckError,
};

pub const LOCALES_DIR: &str = "locales";

static LOCALE_FILE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^locales/(?P<tag>[^/]+?)(?P<kind>\.default|\.schema)?\.json$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleFileKind {
    Catalog,
    Default,
    Schema,
}

/// A file under `locales/` recognized by its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFile {
    /// Snapshot key, e.g. `locales/en.default.json`.
    pub path: String,
    /// Locale tag, e.g. `en` or `pt-BR`.
    pub tag: String,
    pub kind: LocaleFileKind,
}

impl LocaleFile {
    /// Recognizes a theme-relative path as a locale file.
    ///
    /// # Examples
    ///
    /// ```
    /// use theme_check::core::locale::{LocaleFile, LocaleFileKind};
    ///
    /// let file = LocaleFile::parse("locales/en.default.json").unwrap();
    /// assert_eq!(file.tag, "en");
    /// assert_eq!(file.kind, LocaleFileKind::Default);
    ///
    /// assert!(LocaleFile::parse("sections/header.json").is_none());
    /// ```
    pub fn parse(relative_path: &str) -> Option<Self> {
        let path = relative_key(relative_path);
        let caps = LOCALE_FILE_REGEX.captures(&path)?;
        let kind = match caps.name("kind").map(|m| m.as_str()) {
            Some(".default") => LocaleFileKind::Default,
            Some(".schema") => LocaleFileKind::Schema,
            _ => LocaleFileKind::Catalog,
        };
        let tag = caps["tag"].to_string();
        Some(Self { path, tag, kind })
    }

    pub fn is_schema(&self) -> bool {
        self.kind == LocaleFileKind::Schema
    }

    pub fn is_default(&self) -> bool {
        self.kind == LocaleFileKind::Default
    }
}

/// Picks the single default file out of a list of locale files.
///
/// More than one default file is a configuration error.
fn single_default<'a>(
    root: &Path,
    files: impl IntoIterator<Item = &'a LocaleFile>,
) -> Result<Option<&'a LocaleFile>> {
    let defaults: Vec<&LocaleFile> = files.into_iter().filter(|f| f.is_default()).collect();
    match defaults.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        many => Err(ThemeCheckError::MultipleDefaultLocales {
            root: root.to_path_buf(),
            files: many.iter().map(|f| f.path.clone()).collect(),
        }
        .into()),
    }
}

/// Lists locale files in `root/locales` on disk, schema files included.
///
/// A missing `locales` directory yields an empty list.
pub fn scan_locale_files(root: &Path) -> Result<Vec<LocaleFile>> {
    let dir = root.join(LOCALES_DIR);
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read directory: {:?}", dir));
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        let relative = format!("{}/{}", LOCALES_DIR, name.to_string_lossy());
        if let Some(file) = LocaleFile::parse(&relative) {
            files.push(file);
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn find_default_file(root: &Path) -> Result<Option<LocaleFile>> {
    let files = scan_locale_files(root)?;
    Ok(single_default(root, &files)?.cloned())
}

/// Reads the default locale tag of the theme at `root`.
pub fn default_locale(root: &Path) -> Result<Option<String>> {
    Ok(find_default_file(root)?.map(|f| f.tag))
}

/// Reads and parses the default translations of the theme at `root`.
pub fn default_translations(root: &Path) -> Result<Option<Value>> {
    let Some(file) = find_default_file(root)? else {
        return Ok(None);
    };
    let path = root.join(&file.path);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;
    let json = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {:?}", path))?;
    Ok(Some(json))
}

/// Returns an accessor yielding the default locale of `root` on each call.
pub fn default_locale_factory(
    root: impl Into<PathBuf>,
) -> impl Fn() -> Result<Option<String>> + Send + Sync {
    let root = root.into();
    move || default_locale(&root)
}

/// Returns an accessor yielding the parsed default translations of `root` on each call.
pub fn default_translations_factory(
    root: impl Into<PathBuf>,
) -> impl Fn() -> Result<Option<Value>> + Send + Sync {
    let root = root.into();
    move || default_translations(&root)
}

/// Document-independent locale information for one theme root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleContext {
    pub default_locale: Option<String>,
    pub default_translations: Option<Value>,
}

impl LocaleContext {
    pub fn load(root: &Path) -> Result<Self> {
        Ok(Self {
            default_locale: default_locale_factory(root)()?,
            default_translations: default_translations_factory(root)()?,
        })
    }

    /// Same lookup as [`LocaleContext::load`], against in-memory content.
    ///
    /// A default catalog that does not parse leaves `default_translations`
    /// empty; the checks report the broken file themselves.
    pub fn from_snapshot(snapshot: &ProjectSnapshot) -> Result<Self> {
        let files = snapshot.locale_files();
        let Some(default) = single_default(Path::new(LOCALES_DIR), &files)? else {
            return Ok(Self::default());
        };
        let translations = snapshot.get(&default.path).and_then(|content| {
            serde_json::from_str::<Value>(content)
                .inspect_err(|e| debug!(path = %default.path, "default catalog does not parse: {}", e))
                .ok()
        });
        Ok(Self {
            default_locale: Some(default.tag.clone()),
            default_translations: translations,
        })
    }
}

/// Locale contexts keyed by normalized root.
#[derive(Debug, Default)]
pub struct LocaleContextCache {
    entries: HashMap<String, Arc<LocaleContext>>,
}

impl LocaleContextCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached context for `root`, loading it from disk on first use.
    pub fn get_or_load(&mut self, root: &Path) -> Result<Arc<LocaleContext>> {
        let key = normalize_separators(root);
        if let Some(ctx) = self.entries.get(&key) {
            return Ok(Arc::clone(ctx));
        }
        debug!(root = %key, "loading locale context");
        let ctx = Arc::new(LocaleContext::load(root)?);
        self.entries.insert(key, Arc::clone(&ctx));
        Ok(ctx)
    }

    /// Drops the cached context for `root`, e.g. after a locale file changed.
    pub fn invalidate(&mut self, root: &Path) -> bool {
        self.entries.remove(&normalize_separators(root)).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
