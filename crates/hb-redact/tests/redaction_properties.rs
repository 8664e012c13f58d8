//! Property tests for hb-redact.
//!
//! These tests verify, over generated nested configuration data:
//! - No surviving key contains a sensitive pattern at any depth
//! - Redaction is idempotent
//! - Sequence lengths and entry order survive redaction
//! - The dot rewrite only ever touches top-level keys

use hb_redact::{redact, Redactor, SensitivePatterns, DEFAULT_SENSITIVE_PATTERNS};
use proptest::prelude::*;
use serde_json::{json, Value};

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_]{1,8}",
        "[a-z]{1,4}\\.[a-z]{1,4}",
        (
            prop::sample::select(DEFAULT_SENSITIVE_PATTERNS.to_vec()),
            "[a-z_.]{0,4}",
            "[a-z_.]{0,4}",
        )
            .prop_map(|(pattern, prefix, suffix)| format!("{prefix}{pattern}{suffix}")),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z ]{0,10}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn find_sensitive_key<'a>(value: &'a Value, patterns: &SensitivePatterns) -> Option<&'a str> {
    match value {
        Value::Object(map) => map.iter().find_map(|(key, child)| {
            if patterns.matches(key) {
                Some(key.as_str())
            } else {
                find_sensitive_key(child, patterns)
            }
        }),
        Value::Array(items) => items.iter().find_map(|item| find_sensitive_key(item, patterns)),
        _ => None,
    }
}

/// Checks that `output` is `input` with sensitive entries removed and nothing
/// else changed.
fn is_pruned_copy(input: &Value, output: &Value, patterns: &SensitivePatterns) -> bool {
    match (input, output) {
        (Value::Object(src), Value::Object(dst)) => {
            let survivors: Vec<_> = src.iter().filter(|(k, _)| !patterns.matches(k)).collect();
            survivors.len() == dst.len()
                && survivors.iter().zip(dst.iter()).all(|((sk, sv), (dk, dv))| {
                    *sk == dk && is_pruned_copy(sv, dv, patterns)
                })
        }
        (Value::Array(src), Value::Array(dst)) => {
            src.len() == dst.len()
                && src
                    .iter()
                    .zip(dst.iter())
                    .all(|(s, d)| is_pruned_copy(s, d, patterns))
        }
        (a, b) => a == b,
    }
}

proptest! {
    #[test]
    fn prop_no_sensitive_key_survives(value in arb_value(), rewrite in any::<bool>()) {
        let patterns = SensitivePatterns::default();
        let out = redact(value, &patterns, rewrite);
        prop_assert_eq!(find_sensitive_key(&out, &patterns), None);
    }

    #[test]
    fn prop_idempotent(value in arb_value(), rewrite in any::<bool>()) {
        let patterns = SensitivePatterns::default();
        let once = redact(value, &patterns, rewrite);
        let twice = redact(once.clone(), &patterns, rewrite);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_shape_and_order_preserved(value in arb_value()) {
        let redactor = Redactor::new(SensitivePatterns::default());
        let out = redactor.redact_value(value.clone());
        prop_assert!(is_pruned_copy(&value, &out, redactor.patterns()));
    }

    #[test]
    fn prop_rewrite_leaves_no_top_level_dots(value in arb_value()) {
        let out = redact(value, &SensitivePatterns::default(), true);
        if let Value::Object(map) = out {
            prop_assert!(map.keys().all(|k| !k.contains('.')));
        }
    }
}

#[test]
fn test_nested_dotted_keys_survive_rewrite() {
    let out = redact(
        json!({"a.b.c": {"x.y": {"deeper.key": 1}}, "list.of": [{"p.q": 2}]}),
        &SensitivePatterns::default(),
        true,
    );
    assert_eq!(
        out,
        json!({"a_b_c": {"x.y": {"deeper.key": 1}}, "list_of": [{"p.q": 2}]})
    );
}

#[test]
fn test_realistic_minion_config() {
    let config = json!({
        "id": "web01",
        "log_level": "error",
        "file_roots": {"base": ["/srv/salt"]},
        "hubblestack": {
            "returner": {
                "splunk": [{
                    "token": "00000000-0000-0000-0000-000000000000",
                    "indexer": "splunk.example.com",
                    "index": "hubble"
                }],
                "graylog": [{"gelfhttp": "https://graylog", "port": 12202}]
            }
        },
        "s3.keyid": "AKIA",
        "gpg": {"passphrase_file": "/root/.gpg", "homedir": "/root/.gnupg"},
        "sqlite": {"path": "/var/cache/hubble.db"}
    });

    let out = redact(config, &SensitivePatterns::default(), true);

    assert_eq!(
        out,
        json!({
            "id": "web01",
            "log_level": "error",
            "file_roots": {"base": ["/srv/salt"]},
            "hubblestack": {
                "returner": {
                    "splunk": [{"indexer": "splunk.example.com", "index": "hubble"}],
                    "graylog": [{"gelfhttp": "https://graylog", "port": 12202}]
                }
            },
            "gpg": {"homedir": "/root/.gnupg"},
            "sqlite": {"path": "/var/cache/hubble.db"}
        })
    );
}

#[test]
fn test_custom_patterns() {
    let patterns = SensitivePatterns::new(["secret"]);
    let out = redact(
        json!({"client_secret": 1, "password": 2}),
        &patterns,
        false,
    );
    assert_eq!(out, json!({"password": 2}));
}
