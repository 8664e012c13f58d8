//! Outbound delivery of GELF payloads.
//!
//! Delivery is a single attempt. Failures are returned to the caller, which
//! owns retry and backoff.

use crate::DestinationConfig;
use hb_common::{Error, Result};
use std::time::Duration;

/// Delivers serialized payloads to a destination.
pub trait GelfTransport {
    /// Send one JSON document to `destination`.
    fn send(&self, destination: &DestinationConfig, body: &str) -> Result<()>;
}

/// Blocking HTTP transport.
///
/// Each destination gets an agent with its own timeout and proxy; requests
/// are `POST {gelfhttp}:{port}/gelf` with a JSON body.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    user_agent: Option<String>,
}

impl HttpTransport {
    /// Create a transport with the client's default user agent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    fn agent_for(&self, destination: &DestinationConfig) -> Result<ureq::Agent> {
        let mut builder =
            ureq::AgentBuilder::new().timeout(Duration::from_secs(destination.timeout_secs));

        if let Some(url) = destination.proxy_for_endpoint() {
            let proxy = ureq::Proxy::new(url).map_err(|e| {
                Error::InvalidDestination(format!("invalid proxy '{}': {}", url, e))
            })?;
            builder = builder.proxy(proxy);
        }
        if let Some(ref user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        Ok(builder.build())
    }
}

impl GelfTransport for HttpTransport {
    fn send(&self, destination: &DestinationConfig, body: &str) -> Result<()> {
        let endpoint = destination.endpoint();
        let agent = self.agent_for(destination)?;

        match agent
            .post(&endpoint)
            .set("Content-Type", "application/json")
            .send_string(body)
        {
            Ok(response) => {
                tracing::trace!(endpoint = %endpoint, status = response.status(), "delivered payload");
                Ok(())
            }
            Err(ureq::Error::Status(status, _)) => Err(Error::HttpStatus { endpoint, status }),
            Err(ureq::Error::Transport(transport)) => Err(Error::Transport {
                endpoint,
                message: transport.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_proxy_rejected() {
        let mut dest = DestinationConfig::new("http://127.0.0.1", "s");
        dest.proxy.insert("http".into(), "ftp://proxy.example.com:3128".into());
        let err = HttpTransport::new().send(&dest, "{}").unwrap_err();
        assert_eq!(err.code(), 11);
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port with nothing listening.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let dest = DestinationConfig::new("http://127.0.0.1", "s")
            .with_port(port)
            .with_timeout_secs(2);

        let err = HttpTransport::new().send(&dest, "{}").unwrap_err();
        assert!(matches!(err, Error::Transport { .. }), "{err}");
        assert!(err.is_recoverable());
    }
}
