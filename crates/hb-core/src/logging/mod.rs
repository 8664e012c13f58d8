//! Structured logging setup for host runtimes.
//!
//! All publisher crates log through `tracing`; this module installs a
//! subscriber writing to stderr, either human-readable or as JSON lines.
//!
//! # Usage
//!
//! ```ignore
//! use hb_core::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::from_env(None, None))?;
//! tracing::info!(target: "hb_core", "publisher ready");
//! ```

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel, ENV_LOG_FORMAT, ENV_LOG_LEVEL};

use hb_common::{Error, Result};
use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events are enabled at the configured level.
const LOG_TARGETS: &[&str] = &["hb_common", "hb_core", "hb_gelf", "hb_redact"];

/// Build the filter: `RUST_LOG` when set, otherwise the configured level for
/// the publisher crates.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, config.level))
            .collect::<Vec<_>>()
            .join(",");
        EnvFilter::new(directives)
    })
}

/// Install the global subscriber.
///
/// Fails when a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = build_filter(config);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);
            if config.timestamps {
                registry.with(layer).try_init()
            } else {
                registry.with(layer.without_time()).try_init()
            }
        }
        LogFormat::Jsonl => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    installed.map_err(|e| Error::Config(format!("failed to install log subscriber: {}", e)))
}
