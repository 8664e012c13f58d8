//! Sensitive-key redaction for Hubble configuration snapshots.
//!
//! This crate provides a small, reusable redaction engine that strips
//! credentials out of nested configuration data before it leaves the host,
//! and the publisher that emits the filtered configuration as an event.
//!
//! # Key Features
//!
//! - **Key-based removal**: any mapping key containing a sensitive substring
//!   (`password`, `token`, ...) is dropped together with its whole subtree,
//!   at every depth.
//! - **Dot rewriting**: top-level keys such as `file_roots.base` can be
//!   renamed to `file_roots_base` for indexers that treat dots as paths.
//! - **Order preserving**: surviving entries keep their relative order.
//!
//! # Example
//!
//! ```
//! use hb_redact::{Redactor, SensitivePatterns};
//! use serde_json::json;
//!
//! let redactor = Redactor::new(SensitivePatterns::default());
//! let out = redactor.redact_value(json!({"db": {"password": "x", "port": 5432}}));
//! assert_eq!(out, json!({"db": {"port": 5432}}));
//! ```

pub mod engine;
pub mod patterns;
pub mod publisher;

pub use engine::{redact, Redactor};
pub use patterns::{SensitivePatterns, DEFAULT_SENSITIVE_PATTERNS};
pub use publisher::{publish, EventSink, PublishOptions, CONFIG_SOURCETYPE, GRAINS_KEY};
