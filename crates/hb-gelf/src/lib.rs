//! Hubble query results to Graylog.
//!
//! This crate provides:
//! - Event shaping: one flat event per query result row, merged with run
//!   context, cloud metadata and custom lookup fields
//! - GELF payload wrapping
//! - Destination configuration read from the host configuration
//! - A blocking HTTP transport and the returner loop tying it together

pub mod destination;
pub mod event;
pub mod payload;
pub mod returner;
pub mod transport;

pub use destination::{destinations_for, DestinationConfig, SourceKind, GRAYLOG_CONFIG_KEY};
pub use event::{build_event, EventContext, CUSTOM_FIELD_PREFIX};
pub use payload::{GelfPayload, SHORT_MESSAGE};
pub use returner::{return_results, returner, JobReturn};
pub use transport::{GelfTransport, HttpTransport};
