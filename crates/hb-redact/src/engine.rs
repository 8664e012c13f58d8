//! Main redaction engine.
//!
//! The Redactor removes every mapping entry whose key contains a sensitive
//! pattern, at any depth, and can rename dotted top-level keys beforehand.
//! Inputs are consumed and rebuilt, so callers pass an owned copy.

use crate::SensitivePatterns;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Redact `value` with `patterns`, optionally rewriting dotted top-level keys
/// first.
///
/// Patterns match the key text as it exists when filtering runs, i.e. after
/// the rewrite: a top-level `s3.key` becomes `s3_key` and no longer contains
/// the `s3.key` pattern.
pub fn redact(value: Value, patterns: &SensitivePatterns, rewrite_dots: bool) -> Value {
    let value = if rewrite_dots {
        match value {
            Value::Object(map) => Value::Object(rewrite_top_level_dots(map)),
            other => other,
        }
    } else {
        value
    };
    remove_sensitive(value, patterns)
}

/// Rename every top-level key containing `.` by replacing dots with `_`.
///
/// Renamed entries keep their position. A renamed key overwrites an undotted
/// key of the same name wherever either appears; between two renamed keys the
/// later one wins. The first slot holding the name is kept. Nested mappings
/// are untouched.
pub fn rewrite_top_level_dots(map: Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::with_capacity(map.len());
    let mut renamed_keys = HashSet::new();
    for (key, value) in map {
        if key.contains('.') {
            let renamed = key.replace('.', "_");
            if out.contains_key(&renamed) {
                tracing::trace!(key = %key, renamed = %renamed, "dot rewrite overwrote existing key");
            }
            out.insert(renamed.clone(), value);
            renamed_keys.insert(renamed);
        } else if renamed_keys.contains(&key) {
            tracing::trace!(key = %key, "kept renamed value over undotted key");
        } else {
            out.insert(key, value);
        }
    }
    out
}

fn remove_sensitive(value: Value, patterns: &SensitivePatterns) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| !patterns.matches(key))
                .map(|(key, value)| (key, remove_sensitive(value, patterns)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| remove_sensitive(item, patterns))
                .collect(),
        ),
        scalar => scalar,
    }
}

/// Redaction engine bound to one pattern set.
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    patterns: SensitivePatterns,
}

impl Redactor {
    /// Create a redactor with the given patterns.
    pub fn new(patterns: SensitivePatterns) -> Self {
        Self { patterns }
    }

    /// The active pattern set.
    pub fn patterns(&self) -> &SensitivePatterns {
        &self.patterns
    }

    /// Remove sensitive entries from an arbitrary value. No key rewriting.
    pub fn redact_value(&self, value: Value) -> Value {
        remove_sensitive(value, &self.patterns)
    }

    /// Filter a configuration map for publishing: optional dot rewrite of
    /// top-level keys, then sensitive-key removal at every depth.
    pub fn filter_config(&self, opts: Map<String, Value>, remove_dots: bool) -> Map<String, Value> {
        let before = opts.len();
        let filtered = match redact(Value::Object(opts), &self.patterns, remove_dots) {
            Value::Object(map) => map,
            // redact() maps objects to objects
            _ => Map::new(),
        };
        tracing::trace!(
            top_level_before = before,
            top_level_after = filtered.len(),
            "filtered configuration"
        );
        filtered
    }
}
