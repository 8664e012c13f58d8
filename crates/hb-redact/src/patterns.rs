//! Sensitive key patterns.
//!
//! A mapping key is sensitive when it contains any pattern of the set as a
//! case-sensitive substring.

use serde::{Deserialize, Serialize};

/// Substrings that mark a configuration key as sensitive.
pub const DEFAULT_SENSITIVE_PATTERNS: &[&str] =
    &["password", "token", "passphrase", "privkey", "keyid", "s3.key"];

/// Immutable set of sensitive key substrings.
///
/// Serializes as a plain list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SensitivePatterns {
    patterns: Vec<String>,
}

impl SensitivePatterns {
    /// Create a set from arbitrary patterns. Empty patterns are ignored since
    /// they would match every key.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self {
            patterns: Vec::new(),
        };
        for pattern in patterns {
            set.push(pattern.into());
        }
        set
    }

    /// Return a copy of this set with one more pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.push(pattern.into());
        self
    }

    /// Whether `key` contains any of the patterns.
    pub fn matches(&self, key: &str) -> bool {
        self.patterns.iter().any(|p| key.contains(p.as_str()))
    }

    /// Iterate over the patterns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    /// Number of patterns in the set.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set has no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn push(&mut self, pattern: String) {
        if !pattern.is_empty() && !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }
}

impl Default for SensitivePatterns {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_PATTERNS.iter().copied())
    }
}

impl From<Vec<String>> for SensitivePatterns {
    fn from(patterns: Vec<String>) -> Self {
        Self::new(patterns)
    }
}

impl From<SensitivePatterns> for Vec<String> {
    fn from(set: SensitivePatterns) -> Self {
        set.patterns
    }
}
