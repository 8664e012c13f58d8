//! Graylog destination configuration.
//!
//! Destinations are read from the host configuration under
//! `hubblestack:returner:graylog`, a list of entries such as:
//!
//! ```yaml
//! hubblestack:
//!   returner:
//!     graylog:
//!       - gelfhttp: https://graylog-gelf-http-input-addr
//!         port: 12202
//!         timeout: 10
//!         proxy: {}
//!         custom_fields: [site]
//!         sourcetype_nebula: hubble_osquery
//!         sourcetype_pulsar: hubble_fim
//!         sourcetype_nova: hubble_audit
//! ```

use hb_common::{ConfigLookup, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Lookup key of the destination list.
pub const GRAYLOG_CONFIG_KEY: &str = "hubblestack:returner:graylog";

/// Default GELF HTTP input port.
pub const DEFAULT_PORT: u16 = 12202;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which data stream a destination is configured for.
///
/// Each stream reads its own `sourcetype_<stream>` label from a destination
/// entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Query results.
    Nebula,
    /// File integrity events.
    Pulsar,
    /// Audit results.
    Nova,
}

impl SourceKind {
    /// Entry key holding this stream's source-type label.
    pub fn sourcetype_key(&self) -> String {
        format!("sourcetype_{}", self)
    }

    /// Label used when the entry does not set one.
    pub fn default_sourcetype(&self) -> &'static str {
        match self {
            SourceKind::Nebula => "hubble_osquery",
            SourceKind::Pulsar => "hubble_fim",
            SourceKind::Nova => "hubble_audit",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Nebula => write!(f, "nebula"),
            SourceKind::Pulsar => write!(f, "pulsar"),
            SourceKind::Nova => write!(f, "nova"),
        }
    }
}

/// One outbound Graylog target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Base URL of the GELF HTTP input, without port.
    pub gelfhttp: String,

    /// Port of the GELF HTTP input.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Source-type label for this stream.
    pub sourcetype: String,

    /// Names resolved through the config lookup into `custom_` fields.
    #[serde(default)]
    pub custom_fields: Vec<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout", rename = "timeout")]
    pub timeout_secs: u64,

    /// Proxy URLs keyed by scheme (`http`, `https`).
    #[serde(default)]
    pub proxy: BTreeMap<String, String>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl DestinationConfig {
    /// Create a destination with default port, timeout and no custom fields.
    pub fn new(gelfhttp: impl Into<String>, sourcetype: impl Into<String>) -> Self {
        Self {
            gelfhttp: gelfhttp.into(),
            port: DEFAULT_PORT,
            sourcetype: sourcetype.into(),
            custom_fields: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            proxy: BTreeMap::new(),
        }
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the custom field names.
    pub fn with_custom_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Full GELF endpoint URL: `{gelfhttp}:{port}/gelf`.
    pub fn endpoint(&self) -> String {
        format!("{}:{}/gelf", self.gelfhttp, self.port)
    }

    /// Proxy matching the endpoint scheme, if configured.
    pub fn proxy_for_endpoint(&self) -> Option<&str> {
        let scheme = if self.gelfhttp.starts_with("https://") {
            "https"
        } else {
            "http"
        };
        self.proxy
            .get(scheme)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Parse one destination entry for `kind`.
    pub fn from_entry(entry: &Map<String, Value>, kind: SourceKind) -> Result<Self> {
        let gelfhttp = match entry.get("gelfhttp") {
            Some(Value::String(url)) if !url.is_empty() => url.clone(),
            _ => {
                return Err(Error::InvalidDestination(
                    "graylog destination is missing 'gelfhttp'".to_string(),
                ))
            }
        };

        let sourcetype = match entry.get(&kind.sourcetype_key()) {
            Some(Value::String(label)) => label.clone(),
            _ => kind.default_sourcetype().to_string(),
        };

        let mut normalized = entry.clone();
        normalized.insert("gelfhttp".into(), Value::String(gelfhttp));
        normalized.insert("sourcetype".into(), Value::String(sourcetype));

        serde_json::from_value(Value::Object(normalized))
            .map_err(|e| Error::InvalidDestination(format!("graylog destination: {}", e)))
    }
}

/// Read every configured destination for `kind`.
///
/// A single mapping is accepted in place of a list. No configuration yields
/// no destinations.
pub fn destinations_for(lookup: &dyn ConfigLookup, kind: SourceKind) -> Result<Vec<DestinationConfig>> {
    let entries = match lookup.get(GRAYLOG_CONFIG_KEY, Value::Null) {
        Value::Null => {
            tracing::debug!(key = GRAYLOG_CONFIG_KEY, "no graylog destinations configured");
            return Ok(Vec::new());
        }
        Value::Array(items) => items,
        single @ Value::Object(_) => vec![single],
        other => {
            return Err(Error::Config(format!(
                "{} must be a list of destinations, got {}",
                GRAYLOG_CONFIG_KEY, other
            )))
        }
    };

    entries
        .iter()
        .map(|entry| match entry {
            Value::Object(map) => DestinationConfig::from_entry(map, kind),
            other => Err(Error::InvalidDestination(format!(
                "graylog destination must be a mapping, got {}",
                other
            ))),
        })
        .collect()
}
