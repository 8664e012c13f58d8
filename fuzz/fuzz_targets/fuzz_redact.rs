//! Fuzz target for sensitive-key redaction.
//!
//! Any JSON document must redact without panicking, leave no sensitive key
//! behind, and be stable under a second pass.

#![no_main]

use hb_redact::{redact, SensitivePatterns};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fn has_sensitive_key(value: &Value, patterns: &SensitivePatterns) -> bool {
    match value {
        Value::Object(map) => map
            .iter()
            .any(|(k, v)| patterns.matches(k) || has_sensitive_key(v, patterns)),
        Value::Array(items) => items.iter().any(|v| has_sensitive_key(v, patterns)),
        _ => false,
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<Value>(data) else {
        return;
    };
    let patterns = SensitivePatterns::default();
    let rewrite = data.len() % 2 == 0;

    let once = redact(value, &patterns, rewrite);
    assert!(!has_sensitive_key(&once, &patterns));
    assert_eq!(redact(once.clone(), &patterns, rewrite), once);
});
