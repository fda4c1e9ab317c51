//! Configuration types for the dynamic DNS updater
//!
//! Nothing here loads files or reads the environment; callers build these
//! values however they like (serde, env vars, literals).

use crate::fields;
use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input fields for one update, keyed by field name
///
/// Ordered so that logging and rendering never depend on hash order.
pub type FieldMap = BTreeMap<String, String>;

/// One update request: which provider, with which fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// Target provider
    pub provider: Provider,

    /// Field values (domain, credentials, addresses, ...)
    #[serde(default)]
    pub fields: FieldMap,
}

impl UpdateRequest {
    /// Create a request with no fields
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            fields: FieldMap::new(),
        }
    }

    /// Set a field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set the IPv4 address to publish
    pub fn with_ip(self, ip: std::net::Ipv4Addr) -> Self {
        self.with_field(fields::IP_ADDRESS, ip.to_string())
    }

    /// Set the IPv6 address to publish
    pub fn with_ipv6(self, ip: std::net::Ipv6Addr) -> Self {
        self.with_field(fields::IPV6_ADDRESS, ip.to_string())
    }
}

/// Settings for the HTTP transport
///
/// The core never enforces these itself; transports read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Deadline for the whole request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Value of the `User-Agent` header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl HttpConfig {
    /// Validate the transport settings
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("HTTP timeout must be > 0"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(crate::Error::config("HTTP user agent cannot be empty"));
        }
        Ok(())
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("dyndns/{}", env!("CARGO_PKG_VERSION"))
}
