//! Hubble configuration publisher and Graylog returner.
//!
//! Entry crate for host runtimes. Re-exports the two publishers and adds the
//! ambient pieces a host needs to run them:
//! - [`logging`]: tracing subscriber setup (human or JSON lines on stderr)
//! - [`sink`]: an [`EventSink`] that emits published configuration through
//!   `tracing`
//!
//! # Example
//!
//! ```no_run
//! use hb_core::{publish, PublishOptions, TracingSink};
//! use hb_core::logging::{init_logging, LogConfig};
//! use serde_json::{json, Value};
//!
//! init_logging(&LogConfig::from_env(None, None)).ok();
//!
//! let opts = match json!({"id": "web01", "db_password": "x"}) {
//!     Value::Object(map) => map,
//!     _ => unreachable!(),
//! };
//! let filtered = publish(&opts, &PublishOptions::default(), &TracingSink).unwrap();
//! assert!(!filtered.contains_key("db_password"));
//! ```

pub mod logging;
pub mod sink;

pub use hb_common::{ConfigLookup, Error, ErrorCategory, HostFacts, OptsLookup, Result};
pub use hb_gelf::{
    build_event, destinations_for, return_results, returner, DestinationConfig, EventContext,
    GelfPayload, GelfTransport, HttpTransport, JobReturn, SourceKind,
};
pub use hb_redact::{
    publish, redact, EventSink, PublishOptions, Redactor, SensitivePatterns, CONFIG_SOURCETYPE,
};
pub use sink::TracingSink;
