//! GELF payload wrapping an event.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fixed `short_message` of every payload.
pub const SHORT_MESSAGE: &str = "hubblestack";

/// Document POSTed to the Graylog GELF HTTP input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GelfPayload {
    /// Display hostname of the reporting machine.
    pub host: String,

    /// Source-type label of the destination.
    #[serde(rename = "_sourcetype")]
    pub sourcetype: String,

    /// Always [`SHORT_MESSAGE`].
    pub short_message: String,

    /// The flat event.
    pub hubblemsg: Map<String, Value>,
}

impl GelfPayload {
    /// Wrap `event` for delivery.
    pub fn new(host: impl Into<String>, sourcetype: impl Into<String>, event: Map<String, Value>) -> Self {
        Self {
            host: host.into(),
            sourcetype: sourcetype.into(),
            short_message: SHORT_MESSAGE.to_string(),
            hubblemsg: event,
        }
    }

    /// Serialize to the JSON request body.
    pub fn to_json(&self) -> hb_common::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
