//! Translation catalog trees.
//!
//! A catalog value is classified once into a [`TranslationNode`] so the
//! comparison never has to re-inspect raw JSON.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use serde_json::Value;

/// CLDR plural categories.
pub const PLURAL_CATEGORIES: &[&str] = &["zero", "one", "two", "few", "many", "other"];

pub fn is_plural_category(key: &str) -> bool {
    PLURAL_CATEGORIES.contains(&key)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    /// A single translated string (other scalars are kept as their JSON text).
    Leaf(String),
    /// Plural variants keyed by CLDR category.
    PluralLeaf(BTreeMap<String, String>),
    /// Nested translations.
    Branch(BTreeMap<String, TranslationNode>),
}

impl TranslationNode {
    /// Classifies a JSON value.
    ///
    /// A non-empty object whose keys are all plural categories is a
    /// [`TranslationNode::PluralLeaf`]; an empty object is an empty branch.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) if !map.is_empty() && map.keys().all(|k| is_plural_category(k)) => {
                TranslationNode::PluralLeaf(
                    map.iter()
                        .map(|(k, v)| (k.clone(), scalar_text(v)))
                        .collect(),
                )
            }
            Value::Object(map) => TranslationNode::Branch(
                map.iter()
                    .map(|(k, v)| (k.clone(), TranslationNode::from_json(v)))
                    .collect(),
            ),
            other => TranslationNode::Leaf(scalar_text(other)),
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, TranslationNode::Branch(_))
    }

    /// Terminal key paths under this node, each starting with `prefix`.
    ///
    /// Keys stay separate segments so keys containing `.` are kept intact.
    /// A leaf yields `prefix` itself. An empty branch yields nothing.
    pub fn leaf_segments<'a>(&'a self, prefix: &[&'a str]) -> Vec<Vec<&'a str>> {
        let mut paths = Vec::new();
        collect_leaf_segments(self, prefix.to_vec(), &mut paths);
        paths
    }
}

fn collect_leaf_segments<'a>(
    node: &'a TranslationNode,
    prefix: Vec<&'a str>,
    out: &mut Vec<Vec<&'a str>>,
) {
    match node {
        TranslationNode::Leaf(_) | TranslationNode::PluralLeaf(_) => out.push(prefix),
        TranslationNode::Branch(children) => {
            for (key, child) in children {
                let mut segments = prefix.clone();
                segments.push(key.as_str());
                collect_leaf_segments(child, segments, out);
            }
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parses catalog text into its top-level branch.
///
/// The top level is always a branch, even if its keys look like plural
/// categories.
pub fn parse_catalog(content: &str) -> Result<BTreeMap<String, TranslationNode>> {
    let json: Value = serde_json::from_str(content)?;
    let Value::Object(map) = json else {
        bail!("expected a JSON object at the top level");
    };
    Ok(map
        .iter()
        .map(|(k, v)| (k.clone(), TranslationNode::from_json(v)))
        .collect())
}

/// Finds the 1-based line where a nested key appears in JSON text.
///
/// Each key segment is searched after the previous one, so `Common.submit`
/// finds the `"submit"` under `"Common"` and not one in another namespace.
/// Only occurrences followed by `:` count as keys.
pub fn locate_key(content: &str, segments: &[&str]) -> Option<usize> {
    let mut search_start = 0;
    for segment in segments {
        let pattern = format!("\"{}\"", segment);
        let remaining = &content[search_start..];

        let mut pos = 0;
        let mut found = false;
        while let Some(rel_pos) = remaining[pos..].find(&pattern) {
            let abs_pos = pos + rel_pos;
            let after_pattern = abs_pos + pattern.len();
            if remaining[after_pattern..].trim_start().starts_with(':') {
                search_start += after_pattern;
                found = true;
                break;
            }
            pos = abs_pos + 1;
        }

        if !found {
            return None;
        }
    }

    if search_start == 0 {
        return None;
    }
    Some(content[..search_start].matches('\n').count() + 1)
}
