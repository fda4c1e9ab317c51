//! Input field names understood by the provider table

pub const HOST: &str = "host";
pub const TOKEN: &str = "token";
pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";
pub const IP_ADDRESS: &str = "ip_address";
pub const IPV6_ADDRESS: &str = "ipv6_address";
pub const DOMAIN: &str = "domain";
pub const URL: &str = "url";

/// Every known field, in a stable order
pub const ALL: &[&str] = &[
    HOST,
    TOKEN,
    USERNAME,
    PASSWORD,
    IP_ADDRESS,
    IPV6_ADDRESS,
    DOMAIN,
    URL,
];

/// Fields whose values must never appear in logs
pub const SECRETS: &[&str] = &[TOKEN, PASSWORD];

/// Whether the field holds a credential
pub fn is_secret(field: &str) -> bool {
    SECRETS.contains(&field)
}
