//! Provider identifiers and their declarative configuration
//!
//! A [`ProviderConf`] is a template: it says where the update request goes,
//! which input fields feed which query parameters, which fields are required,
//! and how to read the provider's answer. Configurations are `static` values
//! owned by the [`registry`](crate::registry); nothing here performs I/O.

use crate::config::FieldMap;
use crate::error::{Error, Result, Violation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported dynamic DNS providers
///
/// The set is closed. Every variant has exactly one configuration, resolved
/// with [`Provider::conf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// AnyDNS.info
    Anydns,
    /// Duck DNS
    Duckdns,
    /// FreeDNS (afraid.org), IPv4 endpoint
    Freedns,
    /// FreeDNS (afraid.org), IPv6 endpoint
    FreednsIpv6,
    /// Mythic Beasts
    Mythicbeasts,
    /// Namecheap
    Namecheap,
    /// No-IP
    NoIp,
    /// Any service reachable through a caller-supplied URL
    Custom,
}

impl Provider {
    /// Every provider, in declaration order
    pub const ALL: [Provider; 8] = [
        Provider::Anydns,
        Provider::Duckdns,
        Provider::Freedns,
        Provider::FreednsIpv6,
        Provider::Mythicbeasts,
        Provider::Namecheap,
        Provider::NoIp,
        Provider::Custom,
    ];

    /// Stable identifier used in configuration
    pub fn id(self) -> &'static str {
        match self {
            Provider::Anydns => "anydns",
            Provider::Duckdns => "duckdns",
            Provider::Freedns => "freedns",
            Provider::FreednsIpv6 => "freedns_ipv6",
            Provider::Mythicbeasts => "mythicbeasts",
            Provider::Namecheap => "namecheap",
            Provider::NoIp => "no_ip",
            Provider::Custom => "custom",
        }
    }

    /// Configuration for this provider
    pub fn conf(self) -> &'static ProviderConf {
        crate::registry::lookup(self)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Provider::ALL
            .into_iter()
            .find(|p| p.id() == wanted)
            .ok_or_else(|| Error::unknown_provider(s))
    }
}

/// HTTP verb used for the update request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraint on the value of a required field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Value must have exactly this many characters
    ExactLength(usize),
}

impl Constraint {
    fn check(self, field: &'static str, value: &str) -> Option<Violation> {
        match self {
            Constraint::ExactLength(expected) => {
                let actual = value.chars().count();
                (actual != expected).then_some(Violation::Length {
                    field,
                    expected,
                    actual,
                })
            }
        }
    }
}

/// Validation rule for one required field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Field name
    pub field: &'static str,
    /// Value substituted when the caller omits the field
    pub default: Option<&'static str>,
    /// Extra check on the value
    pub constraint: Option<Constraint>,
}

impl FieldRule {
    /// Plain required field
    pub const fn required(field: &'static str) -> Self {
        Self {
            field,
            default: None,
            constraint: None,
        }
    }

    /// Required field with a fallback value
    pub const fn with_default(field: &'static str, default: &'static str) -> Self {
        Self {
            field,
            default: Some(default),
            constraint: None,
        }
    }

    /// Required field whose value must have a fixed length
    pub const fn exact_length(field: &'static str, len: usize) -> Self {
        Self {
            field,
            default: None,
            constraint: Some(Constraint::ExactLength(len)),
        }
    }
}

/// How a completed response is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessCheck {
    /// HTTP status in the 2xx range
    Status,
    /// Body starts with any of the prefixes
    StartsWith(&'static [&'static str]),
    /// Body contains the substring
    Contains(&'static str),
}

impl SuccessCheck {
    /// Decide whether a response means the record was updated
    ///
    /// Content-based checks ignore the status code.
    pub fn evaluate(&self, status: u16, body: &str) -> bool {
        match self {
            SuccessCheck::Status => (200..300).contains(&status),
            SuccessCheck::StartsWith(prefixes) => prefixes.iter().any(|p| body.starts_with(p)),
            SuccessCheck::Contains(needle) => body.contains(needle),
        }
    }
}

/// Declarative description of one provider's update API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderConf {
    /// Human-readable label
    pub name: &'static str,
    /// URL template with `{field}` placeholders
    pub base_url: &'static str,
    pub method: HttpMethod,
    /// Query parameter name → source field, in output order
    pub params: &'static [(&'static str, &'static str)],
    /// Required fields, in reporting order
    pub rules: &'static [FieldRule],
    pub success: SuccessCheck,
}

impl ProviderConf {
    /// Check `data` against the rules and fill in defaults
    ///
    /// The input map is left untouched. Fields no rule mentions are carried
    /// over as-is. All violations are collected before failing.
    pub fn validate(&self, data: &FieldMap) -> Result<ValidatedData> {
        let mut fields = data.clone();
        let mut violations = Vec::new();

        for rule in self.rules {
            match data.get(rule.field) {
                Some(value) => {
                    if let Some(violation) =
                        rule.constraint.and_then(|c| c.check(rule.field, value))
                    {
                        violations.push(violation);
                    }
                }
                None => match rule.default {
                    Some(default) => {
                        fields.insert(rule.field.to_string(), default.to_string());
                    }
                    None => violations.push(Violation::Missing { field: rule.field }),
                },
            }
        }

        if !violations.is_empty() {
            return Err(Error::Validation {
                provider: self.name,
                violations,
            });
        }

        Ok(ValidatedData(fields))
    }

    /// Render the request URL for validated data
    pub fn render(&self, data: &ValidatedData) -> Result<url::Url> {
        crate::render::render(self, data)
    }

    /// Whether the response means the record was updated
    pub fn is_success(&self, status: u16, body: &str) -> bool {
        self.success.evaluate(status, body)
    }
}

/// Field map that passed validation, with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedData(FieldMap);

impl ValidatedData {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn as_map(&self) -> &FieldMap {
        &self.0
    }
}
