//! Configuration lookup capability.
//!
//! The host runtime resolves configuration values by name (custom event
//! fields, destination lists). Publishers receive that capability as a
//! [`ConfigLookup`] instead of reaching into host globals.

use serde_json::{Map, Value};

/// Separator between path segments in a lookup key (`a:b:c`).
pub const PATH_DELIMITER: char = ':';

/// Key/value lookup provided by the host runtime.
///
/// Implementations must be side-effect free: callers may look up the same
/// key any number of times.
pub trait ConfigLookup {
    /// Resolve `key`, returning `default` when nothing is configured.
    fn get(&self, key: &str, default: Value) -> Value;
}

/// Lookup backed by an in-memory configuration map.
///
/// Keys are colon-delimited paths walked through nested mappings, so
/// `hubblestack:returner:graylog` reads `opts["hubblestack"]["returner"]["graylog"]`.
/// A key that exists verbatim at the top level wins over path traversal.
#[derive(Debug, Clone, Default)]
pub struct OptsLookup {
    opts: Map<String, Value>,
}

impl OptsLookup {
    /// Wrap a configuration map.
    pub fn new(opts: Map<String, Value>) -> Self {
        Self { opts }
    }

    /// The underlying configuration map.
    pub fn opts(&self) -> &Map<String, Value> {
        &self.opts
    }

    fn walk(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.opts.get(key) {
            return Some(value);
        }

        let mut segments = key.split(PATH_DELIMITER);
        let first = segments.next()?;
        let mut current = self.opts.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

impl From<Map<String, Value>> for OptsLookup {
    fn from(opts: Map<String, Value>) -> Self {
        Self::new(opts)
    }
}

impl ConfigLookup for OptsLookup {
    fn get(&self, key: &str, default: Value) -> Value {
        self.walk(key).cloned().unwrap_or(default)
    }
}

impl<T: ConfigLookup + ?Sized> ConfigLookup for &T {
    fn get(&self, key: &str, default: Value) -> Value {
        (**self).get(key, default)
    }
}
