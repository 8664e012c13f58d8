//! Configuration publisher.
//!
//! Selects part (or all) of the host configuration, strips sensitive keys and
//! optionally emits the result as a log event under a fixed category label.

use crate::{Redactor, SensitivePatterns};
use hb_common::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::Level;

/// Category label attached to published configuration events.
pub const CONFIG_SOURCETYPE: &str = "hubblestack.hubble_config";

/// Host facts live under this key and are never published with a full
/// snapshot.
pub const GRAINS_KEY: &str = "grains";

/// Host capability that accepts a finished event for delivery.
pub trait EventSink {
    /// Emit `payload` at `level` under the category label `sourcetype`.
    fn emit(&self, payload: &Value, level: Level, sourcetype: &str) -> Result<()>;
}

/// Options for a single publish call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishOptions {
    /// Emit to the event sink in addition to returning the filtered map.
    #[serde(default = "default_true")]
    pub report_directly: bool,

    /// Replace dots in top-level keys with underscores.
    #[serde(default = "default_true")]
    pub remove_dots: bool,

    /// Keys to publish. Empty means the whole snapshot minus grains.
    #[serde(default)]
    pub keys: Vec<String>,

    /// Sensitive key patterns.
    #[serde(default)]
    pub patterns: SensitivePatterns,
}

fn default_true() -> bool {
    true
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            report_directly: true,
            remove_dots: true,
            keys: Vec::new(),
            patterns: SensitivePatterns::default(),
        }
    }
}

impl PublishOptions {
    /// Publish only the named keys.
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Toggle direct emission to the sink.
    pub fn with_report_directly(mut self, enabled: bool) -> Self {
        self.report_directly = enabled;
        self
    }

    /// Toggle the top-level dot rewrite.
    pub fn with_remove_dots(mut self, enabled: bool) -> Self {
        self.remove_dots = enabled;
        self
    }
}

/// Filter the configuration snapshot `opts` and optionally emit it to `sink`.
///
/// Requested keys missing from the snapshot are skipped. The snapshot itself
/// is never modified.
pub fn publish(
    opts: &Map<String, Value>,
    options: &PublishOptions,
    sink: &dyn EventSink,
) -> Result<Map<String, Value>> {
    tracing::debug!(keys = options.keys.len(), "started publishing config");

    let selected = select(opts, &options.keys);
    let redactor = Redactor::new(options.patterns.clone());
    let filtered = redactor.filter_config(selected, options.remove_dots);

    if options.report_directly {
        sink.emit(&Value::Object(filtered.clone()), Level::INFO, CONFIG_SOURCETYPE)?;
        tracing::debug!(
            sourcetype = CONFIG_SOURCETYPE,
            entries = filtered.len(),
            "published config"
        );
    }

    Ok(filtered)
}

fn select(opts: &Map<String, Value>, keys: &[String]) -> Map<String, Value> {
    if keys.is_empty() {
        return opts
            .iter()
            .filter(|(key, _)| key.as_str() != GRAINS_KEY)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
    }

    let mut selected = Map::new();
    for key in keys {
        match opts.get(key) {
            Some(value) => {
                selected.insert(key.clone(), value.clone());
            }
            None => tracing::trace!(key = %key, "requested config key not present"),
        }
    }
    selected
}
