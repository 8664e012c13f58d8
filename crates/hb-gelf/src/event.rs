//! Event shaping for query result rows.

use hb_common::ConfigLookup;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prefix for custom lookup fields embedded in an event.
pub const CUSTOM_FIELD_PREFIX: &str = "custom_";

/// Run-context fields attached to every event of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContext {
    /// Query name the row came from.
    pub query: String,

    /// Job id.
    pub job_id: String,

    /// Reporting minion id.
    pub minion_id: String,

    /// Display hostname.
    pub dest_host: String,

    /// Display IPv4 address; `null` in the event when unresolved.
    pub dest_ip: Option<String>,
}

impl EventContext {
    /// Render the context as an event mapping.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("query".into(), Value::String(self.query.clone()));
        map.insert("job_id".into(), Value::String(self.job_id.clone()));
        map.insert("minion_id".into(), Value::String(self.minion_id.clone()));
        map.insert("dest_host".into(), Value::String(self.dest_host.clone()));
        map.insert(
            "dest_ip".into(),
            self.dest_ip.clone().map(Value::String).unwrap_or(Value::Null),
        );
        map
    }
}

/// Build a flat event from one result row.
///
/// Fields are merged row first, then `context`, then `enrichment`; a later
/// source overwrites an earlier one on key collision. Each name in
/// `custom_fields` is then resolved through `lookup` (default `""`) and
/// stored as `custom_<name>`:
/// - strings are stored as-is
/// - sequences are joined with `,`
/// - anything else is skipped
pub fn build_event<L: ConfigLookup + ?Sized>(
    custom_fields: &[String],
    context: &Map<String, Value>,
    enrichment: &Map<String, Value>,
    row: &Map<String, Value>,
    lookup: &L,
) -> Map<String, Value> {
    let mut event = Map::with_capacity(row.len() + context.len() + enrichment.len());
    for source in [row, context, enrichment] {
        for (key, value) in source {
            event.insert(key.clone(), value.clone());
        }
    }

    for name in custom_fields {
        let resolved = lookup.get(name, Value::String(String::new()));
        match flatten_custom_value(resolved) {
            Some(flat) => {
                event.insert(format!("{CUSTOM_FIELD_PREFIX}{name}"), Value::String(flat));
            }
            None => tracing::trace!(field = %name, "custom field has unsupported type, skipped"),
        }
    }

    event
}

fn flatten_custom_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        _ => None,
    }
}
