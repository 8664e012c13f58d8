//! Event sink backed by `tracing`.

use hb_common::Result;
use hb_redact::EventSink;
use serde_json::Value;
use tracing::Level;

/// Emits published payloads as `tracing` events.
///
/// The payload is rendered as compact JSON in the `payload` field and the
/// category label in `sourcetype`, so a JSON-lines subscriber forwards both
/// as structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, payload: &Value, level: Level, sourcetype: &str) -> Result<()> {
        let payload = serde_json::to_string(payload)?;
        match level {
            Level::ERROR => tracing::error!(sourcetype, payload = %payload, "hubble event"),
            Level::WARN => tracing::warn!(sourcetype, payload = %payload, "hubble event"),
            Level::INFO => tracing::info!(sourcetype, payload = %payload, "hubble event"),
            Level::DEBUG => tracing::debug!(sourcetype, payload = %payload, "hubble event"),
            _ => tracing::trace!(sourcetype, payload = %payload, "hubble event"),
        }
        Ok(())
    }
}
