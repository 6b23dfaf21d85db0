//! Translation consistency between locale catalogs.
//!
//! Every non-default, non-schema catalog under `locales/` is compared with
//! the default catalog (`locales/<tag>.default.json`):
//!
//! - a terminal key in the default but not in the other catalog is missing
//! - a terminal key in the other catalog but not in the default has no default
//! - plural variants never need to match between locales
//! - the top-level `shopify` namespace is exempt
//!
//! Offenses always point at the non-default file.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Result, bail};
use async_trait::async_trait;
use rayon::prelude::*;
use serde_json::Value;
use tracing::debug;

use super::{Check, CheckContext};
use crate::{
    core::{
        LocaleFile, ProjectSnapshot, TranslationNode,
        path::absolute_offense_path,
        translation::{locate_key, parse_catalog},
    },
    error::ThemeCheckError,
    offense::{Offense, Severity},
};

pub const NAME: &str = "MatchingTranslations";

/// Top-level namespace provided by the platform, never compared.
pub const RESERVED_NAMESPACE: &str = "shopify";

type Catalog = BTreeMap<String, TranslationNode>;

pub struct MatchingTranslations;

#[async_trait]
impl Check for MatchingTranslations {
    fn name(&self) -> &str {
        NAME
    }

    async fn check(&self, snapshot: &ProjectSnapshot, ctx: &CheckContext) -> Result<Vec<Offense>> {
        let severity = ctx.severity_for(self);
        let files = snapshot.locale_files();

        let default = match default_catalog(snapshot, ctx, &files)? {
            DefaultCatalog::Found(catalog) => catalog,
            DefaultCatalog::Absent => {
                debug!("no default locale file, skipping");
                return Ok(Vec::new());
            }
            DefaultCatalog::Malformed(offense) => return Ok(vec![offense.with_severity(severity)]),
        };

        let others: Vec<&LocaleFile> = files
            .iter()
            .filter(|f| !f.is_default() && !f.is_schema())
            .collect();
        debug!(files = others.len(), "comparing locale files");

        let offenses: Vec<Offense> = others
            .par_iter()
            .map(|file| {
                let content = snapshot.get(&file.path).unwrap_or_default();
                match parse_catalog(content) {
                    Ok(catalog) => compare_catalogs(&default, &catalog, &file.path, content),
                    Err(e) => vec![parse_offense(&file.path, &e)],
                }
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .map(|o| o.with_severity(severity))
            .collect();

        Ok(offenses)
    }
}

enum DefaultCatalog {
    Found(Catalog),
    Absent,
    Malformed(Offense),
}

/// Finds the default catalog in the snapshot, falling back to the
/// translations carried by the context.
fn default_catalog(
    snapshot: &ProjectSnapshot,
    ctx: &CheckContext,
    files: &[LocaleFile],
) -> Result<DefaultCatalog> {
    let defaults: Vec<&LocaleFile> = files.iter().filter(|f| f.is_default()).collect();
    if defaults.len() > 1 {
        return Err(ThemeCheckError::MultipleDefaultLocales {
            root: ctx.config.root_path(),
            files: defaults.iter().map(|f| f.path.clone()).collect(),
        }
        .into());
    }

    if let Some(file) = defaults.first() {
        let content = snapshot.get(&file.path).unwrap_or_default();
        return Ok(match parse_catalog(content) {
            Ok(catalog) => DefaultCatalog::Found(catalog),
            Err(e) => DefaultCatalog::Malformed(parse_offense(&file.path, &e)),
        });
    }

    match ctx.default_translations() {
        Some(Value::Object(map)) => Ok(DefaultCatalog::Found(
            map.iter()
                .map(|(k, v)| (k.clone(), TranslationNode::from_json(v)))
                .collect(),
        )),
        Some(_) => bail!(
            "default translations for locale '{}' are not a JSON object",
            ctx.default_locale().unwrap_or("?")
        ),
        None => Ok(DefaultCatalog::Absent),
    }
}

fn parse_offense(path: &str, err: &anyhow::Error) -> Offense {
    let line = err.downcast_ref::<serde_json::Error>().map(|e| e.line());
    Offense::new(
        NAME,
        Severity::Error,
        absolute_offense_path(path),
        format!("Could not parse '{}': {}", path, err),
    )
    .with_line(line)
}

/// Compares one catalog against the default, reporting at `path`.
pub fn compare_catalogs(
    default: &Catalog,
    other: &Catalog,
    path: &str,
    content: &str,
) -> Vec<Offense> {
    let mut comparison = Comparison {
        absolute_path: absolute_offense_path(path),
        content,
        offenses: Vec::new(),
    };
    comparison.branches(&[], default, other);
    comparison.offenses
}

struct Comparison<'a> {
    absolute_path: String,
    content: &'a str,
    offenses: Vec<Offense>,
}

impl Comparison<'_> {
    fn branches<'c>(&mut self, prefix: &[&'c str], default: &'c Catalog, other: &'c Catalog) {
        let keys: BTreeSet<&'c String> = default.keys().chain(other.keys()).collect();

        for key in keys {
            if prefix.is_empty() && key == RESERVED_NAMESPACE {
                continue;
            }
            let mut segments = prefix.to_vec();
            segments.push(key.as_str());
            match (default.get(key), other.get(key)) {
                (Some(d), Some(o)) => self.nodes(&segments, d, o),
                (Some(d), None) => self.missing_all(d, &segments),
                (None, Some(o)) => self.no_default_all(o, &segments),
                (None, None) => {}
            }
        }
    }

    fn nodes<'c>(
        &mut self,
        segments: &[&'c str],
        default: &'c TranslationNode,
        other: &'c TranslationNode,
    ) {
        match (default, other) {
            (TranslationNode::Branch(d), TranslationNode::Branch(o)) => {
                self.branches(segments, d, o)
            }
            (TranslationNode::Branch(_), _) | (_, TranslationNode::Branch(_)) => {
                self.no_default_all(other, segments);
                self.missing_all(default, segments);
            }
            // Leaves and plural leaves are interchangeable terminals.
            _ => {}
        }
    }

    fn missing_all<'c>(&mut self, default: &'c TranslationNode, segments: &[&'c str]) {
        for leaf in default.leaf_segments(segments) {
            let key = leaf.join(".");
            let offense = Offense::new(
                NAME,
                Severity::Error,
                self.absolute_path.clone(),
                format!("The translation for '{}' is missing", key),
            )
            .with_key(key);
            self.offenses.push(offense);
        }
    }

    fn no_default_all<'c>(&mut self, other: &'c TranslationNode, segments: &[&'c str]) {
        for leaf in other.leaf_segments(segments) {
            let line = locate_key(self.content, &leaf);
            let key = leaf.join(".");
            let offense = Offense::new(
                NAME,
                Severity::Error,
                self.absolute_path.clone(),
                format!("A default translation for '{}' does not exist", key),
            )
            .with_key(key)
            .with_line(line);
            self.offenses.push(offense);
        }
    }
}
