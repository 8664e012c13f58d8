//! Hubble publishers common types.
//!
//! This crate provides foundational types shared across the publisher crates:
//! - The unified error type with stable codes
//! - Host facts and the hostname/IPv4 resolution helper
//! - The configuration lookup capability injected by the host runtime

pub mod error;
pub mod facts;
pub mod lookup;

pub use error::{Error, ErrorCategory, Result};
pub use facts::{HostFacts, ResolvedHost, LOOPBACK_PREFIX};
pub use lookup::{ConfigLookup, OptsLookup, PATH_DELIMITER};
