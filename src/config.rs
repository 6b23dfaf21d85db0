use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    core::{
        path::{normalize_separators, resolve_lexically},
        root::{file_exists, find_root},
    },
    error::ThemeCheckError,
    offense::Severity,
};

pub const CONFIG_FILE_NAME: &str = ".theme-check.yml";

/// Per-check settings block, keyed by the check's name in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

fn default_enabled() -> bool {
    true
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            severity: None,
        }
    }
}

/// The `.theme-check.yml` document as written on disk.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    /// Theme root relative to the directory holding the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Everything else. Mapping values are check settings; other values
    /// (e.g. `extends`, `require`) are accepted and ignored.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Loaded and normalized configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Effective theme root, absolute, forward slashes only.
    pub root: String,
    /// Directory holding the root marker, absolute, forward slashes only.
    pub config_root: String,
    pub ignore: Vec<String>,
    pub checks: BTreeMap<String, CheckSettings>,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

impl Config {
    /// Default configuration for a theme rooted at `root`.
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        let root = normalize_separators(root.as_ref());
        Self {
            config_root: root.clone(),
            root,
            ignore: Vec::new(),
            checks: BTreeMap::new(),
            from_file: false,
        }
    }

    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root)
    }

    /// Settings for a check, falling back to defaults when not configured.
    pub fn check_settings(&self, name: &str) -> CheckSettings {
        self.checks.get(name).cloned().unwrap_or_default()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.check_settings(name).enabled
    }

    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>> {
        self.ignore
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .with_context(|| format!("Invalid glob pattern in 'ignore': \"{}\"", p))
            })
            .collect()
    }
}

/// Starter config written by `theme-check init`.
pub fn default_config_yaml() -> Result<String> {
    let mut extra = BTreeMap::new();
    extra.insert(
        "MatchingTranslations".to_string(),
        serde_yaml::to_value(CheckSettings::default())?,
    );
    let file = ConfigFile {
        root: None,
        ignore: vec!["node_modules/**".to_string()],
        extra,
    };
    serde_yaml::to_string(&file).context("Failed to generate default config.")
}

fn parse_config_file(path: &Path) -> Result<ConfigFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read config file: {:?}", path))?;

    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    if value.is_null() {
        return Ok(ConfigFile::default());
    }

    serde_yaml::from_value(value).map_err(|e| {
        ThemeCheckError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn check_settings_from(
    path: &Path,
    extra: BTreeMap<String, serde_yaml::Value>,
) -> Result<BTreeMap<String, CheckSettings>> {
    let mut checks = BTreeMap::new();
    for (name, value) in extra {
        if !value.is_mapping() {
            debug!(key = %name, "ignoring non-check config key");
            continue;
        }
        let settings: CheckSettings =
            serde_yaml::from_value(value).map_err(|e| ThemeCheckError::InvalidConfig {
                path: path.to_path_buf(),
                reason: format!("'{}': {}", name, e),
            })?;
        checks.insert(name, settings);
    }
    Ok(checks)
}

/// Loads the configuration governing `start`.
///
/// The config root is found with [`find_root`]. A `root` entry in the
/// config file moves the effective theme root relative to it.
pub fn load_config(start: impl AsRef<Path>) -> Result<Config> {
    let config_root = find_root(start)?;
    let config_path = config_root.join(CONFIG_FILE_NAME);

    let (file, from_file) = if file_exists(&config_path)
        .with_context(|| format!("Failed to inspect config file: {:?}", config_path))?
    {
        (parse_config_file(&config_path)?, true)
    } else {
        (ConfigFile::default(), false)
    };

    let root = match &file.root {
        Some(relative) => {
            let root = resolve_lexically(&config_root.join(relative));
            if !root.is_dir() {
                return Err(ThemeCheckError::InvalidConfig {
                    path: config_path,
                    reason: format!("'root' does not name a directory: {:?}", root),
                }
                .into());
            }
            root
        }
        None => config_root.clone(),
    };
    debug!(config_root = %config_root.display(), root = %root.display(), from_file, "loaded config");

    let config = Config {
        root: normalize_separators(&root),
        config_root: normalize_separators(&config_root),
        checks: check_settings_from(&config_path, file.extra)?,
        ignore: file.ignore,
        from_file,
    };

    if let Err(e) = config.ignore_patterns() {
        return Err(ThemeCheckError::InvalidConfig {
            path: config_path,
            reason: format!("{:#}", e),
        }
        .into());
    }

    Ok(config)
}
