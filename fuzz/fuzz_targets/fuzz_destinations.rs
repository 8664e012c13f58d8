//! Fuzz target for graylog destination configuration.
//!
//! Tests that destination parsing handles arbitrary host configuration
//! without panicking, only returning an error.

#![no_main]

use hb_common::OptsLookup;
use hb_gelf::{destinations_for, SourceKind};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(Value::Object(opts)) = serde_json::from_slice::<Value>(data) else {
        return;
    };
    let lookup = OptsLookup::new(opts);
    for kind in [SourceKind::Nebula, SourceKind::Pulsar, SourceKind::Nova] {
        if let Ok(destinations) = destinations_for(&lookup, kind) {
            for destination in destinations {
                let _ = destination.endpoint();
            }
        }
    }
});
