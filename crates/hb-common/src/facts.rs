//! Host facts and display identity resolution.
//!
//! The host runtime collects facts about the machine (fqdn, addresses, cloud
//! metadata). Outbound events carry a display hostname and a display IPv4
//! address chosen from those facts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Addresses with this prefix are loopback and a poor choice for display.
pub const LOOPBACK_PREFIX: &str = "127.";

/// Host-identity facts supplied by the host runtime.
///
/// Deserializes directly from the host's facts mapping; absent fields default
/// to empty so a sparse mapping is still usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostFacts {
    /// Declared fully qualified domain name.
    #[serde(default)]
    pub fqdn: String,

    /// IPv4 addresses associated with the declared fqdn.
    #[serde(default)]
    pub fqdn_ip4: Vec<String>,

    /// All IPv4 addresses of the host.
    #[serde(default)]
    pub ipv4: Vec<String>,

    /// Environment/cloud metadata merged into every event.
    #[serde(default)]
    pub cloud_details: Map<String, Value>,
}

/// Hostname and address chosen for display in outbound events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedHost {
    /// Display hostname.
    pub hostname: String,

    /// Display IPv4 address, if any address fact was available.
    pub ipv4: Option<String>,
}

impl HostFacts {
    /// Build facts from a host facts mapping, ignoring unknown keys.
    pub fn from_value(value: Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Display hostname: the declared fqdn, or `fallback_id` when it is empty.
    pub fn display_hostname(&self, fallback_id: &str) -> String {
        if self.fqdn.is_empty() {
            fallback_id.to_string()
        } else {
            self.fqdn.clone()
        }
    }

    /// Display IPv4 address.
    ///
    /// Prefers the first fqdn-associated address, then the first general
    /// address. A loopback choice is replaced by the first non-loopback,
    /// non-empty general address when one exists.
    pub fn display_ipv4(&self) -> Option<String> {
        let chosen = self.fqdn_ip4.first().or_else(|| self.ipv4.first())?;

        if chosen.starts_with(LOOPBACK_PREFIX) {
            if let Some(alt) = self
                .ipv4
                .iter()
                .find(|addr| !addr.is_empty() && !addr.starts_with(LOOPBACK_PREFIX))
            {
                return Some(alt.clone());
            }
        }

        Some(chosen.clone())
    }

    /// Resolve both display values at once.
    pub fn resolve(&self, fallback_id: &str) -> ResolvedHost {
        let resolved = ResolvedHost {
            hostname: self.display_hostname(fallback_id),
            ipv4: self.display_ipv4(),
        };
        if resolved.ipv4.is_none() {
            tracing::debug!(
                hostname = %resolved.hostname,
                "no IPv4 facts available for display address"
            );
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn facts(fqdn: &str, fqdn_ip4: &[&str], ipv4: &[&str]) -> HostFacts {
        HostFacts {
            fqdn: fqdn.to_string(),
            fqdn_ip4: fqdn_ip4.iter().map(|s| s.to_string()).collect(),
            ipv4: ipv4.iter().map(|s| s.to_string()).collect(),
            cloud_details: Map::new(),
        }
    }

    #[test]
    fn test_hostname_prefers_fqdn() {
        let f = facts("web01.example.com", &[], &[]);
        assert_eq!(f.display_hostname("minion-1"), "web01.example.com");
    }

    #[test]
    fn test_hostname_falls_back_to_id() {
        let f = facts("", &[], &[]);
        assert_eq!(f.display_hostname("minion-1"), "minion-1");
    }

    #[test]
    fn test_ipv4_prefers_fqdn_address() {
        let f = facts("h", &["10.1.1.1"], &["10.0.0.5"]);
        assert_eq!(f.display_ipv4().as_deref(), Some("10.1.1.1"));
    }

    #[test]
    fn test_ipv4_skips_loopback_when_alternative_exists() {
        let f = facts("h", &[], &["127.0.0.1", "10.0.0.5"]);
        assert_eq!(f.display_ipv4().as_deref(), Some("10.0.0.5"));
    }

    #[test]
    fn test_ipv4_keeps_loopback_without_alternative() {
        let f = facts("h", &["127.0.0.1"], &["127.0.0.1"]);
        assert_eq!(f.display_ipv4().as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn test_ipv4_skips_empty_entries() {
        let f = facts("h", &["127.0.1.1"], &["", "127.0.0.1", "192.168.1.20"]);
        assert_eq!(f.display_ipv4().as_deref(), Some("192.168.1.20"));
    }

    #[test]
    fn test_ipv4_no_facts() {
        let f = facts("h", &[], &[]);
        assert_eq!(f.display_ipv4(), None);
    }

    #[test]
    fn test_from_value_defaults_missing_fields() {
        let f = HostFacts::from_value(json!({
            "fqdn": "db01",
            "os": "Linux",
            "cloud_details": {"cloud_instance_id": "i-123"}
        }))
        .unwrap();

        assert_eq!(f.fqdn, "db01");
        assert!(f.fqdn_ip4.is_empty());
        assert!(f.ipv4.is_empty());
        assert_eq!(f.cloud_details["cloud_instance_id"], "i-123");
    }

    #[test]
    fn test_resolve() {
        let f = facts("", &[], &["127.0.0.1", "10.0.0.5"]);
        let resolved = f.resolve("minion-7");
        assert_eq!(resolved.hostname, "minion-7");
        assert_eq!(resolved.ipv4.as_deref(), Some("10.0.0.5"));
    }
}
