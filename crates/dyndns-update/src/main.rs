// # dyndns-update - one-shot dynamic DNS update
//
// Thin wrapper around dyndns-core:
// 1. Read the update request from environment variables
// 2. Initialize logging
// 3. Run exactly one update through the reqwest transport
// 4. Report the result through the exit code
//
// No scheduling and no retries: run it from cron, a systemd timer or a
// network hook.
//
// ## Configuration
//
// ### Provider
// - `DDNS_PROVIDER`: duckdns, freedns, freedns_ipv6, mythicbeasts, anydns,
//   namecheap, no_ip, custom
//
// ### Fields (set only what the provider needs)
// - `DDNS_HOST`, `DDNS_DOMAIN`, `DDNS_TOKEN`, `DDNS_USERNAME`, `DDNS_PASSWORD`
// - `DDNS_IP_ADDRESS`, `DDNS_IPV6_ADDRESS`
// - `DDNS_URL` (custom provider only)
//
// ### Runtime
// - `DDNS_HTTP_TIMEOUT_SECS`: Request timeout (default 30)
// - `DDNS_USER_AGENT`: User-Agent header
// - `DDNS_LOG_LEVEL`: trace, debug, info, warn, error (default info)
// - `DDNS_DRY_RUN`: `true`/`1` to render and log the request without sending it
//
// ## Example
//
// ```bash
// export DDNS_PROVIDER=duckdns
// export DDNS_HOST=myhost
// export DDNS_TOKEN=your-36-character-token
// export DDNS_IP_ADDRESS=203.0.113.7
//
// dyndns-update
// ```

use anyhow::{Context, Result};
use dyndns_core::{FieldMap, HttpConfig, Provider, Updater, fields};
use dyndns_transport_http::ReqwestTransport;
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the possible results of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdateExitCode {
    /// Provider accepted the update (or dry run rendered it)
    Accepted = 0,
    /// Configuration or validation error, nothing was sent
    ConfigError = 1,
    /// Request could not be completed
    RuntimeError = 2,
    /// Provider answered but rejected the update
    Rejected = 3,
}

impl From<UpdateExitCode> for ExitCode {
    fn from(code: UpdateExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    provider: Provider,
    fields: FieldMap,
    http: HttpConfig,
    log_level: Level,
    dry_run: bool,
}

// Field values may hold credentials, so only their names are shown.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("provider", &self.provider)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("http", &self.http)
            .field("log_level", &self.log_level)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let provider = lookup("DDNS_PROVIDER")
            .context("DDNS_PROVIDER is required. Set it via: export DDNS_PROVIDER=duckdns")?
            .parse::<Provider>()
            .with_context(|| {
                let supported: Vec<_> = Provider::ALL.iter().map(|p| p.id()).collect();
                format!("Supported providers: {}", supported.join(", "))
            })?;

        // Blank variables count as unset so they never render as empty parameters.
        // Other values are passed through untouched.
        let fields: FieldMap = fields::ALL
            .iter()
            .filter_map(|field| {
                let value = lookup(&format!("DDNS_{}", field.to_ascii_uppercase()))?;
                (!value.trim().is_empty()).then(|| (field.to_string(), value))
            })
            .collect();

        let mut http = HttpConfig::default();
        if let Some(timeout) = lookup("DDNS_HTTP_TIMEOUT_SECS") {
            http.timeout_secs = timeout
                .trim()
                .parse()
                .with_context(|| format!("DDNS_HTTP_TIMEOUT_SECS must be a number. Got: {}", timeout))?;
        }
        if let Some(user_agent) = lookup("DDNS_USER_AGENT") {
            http.user_agent = user_agent;
        }
        http.validate()?;

        let log_level = match lookup("DDNS_LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            other => anyhow::bail!(
                "DDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                other
            ),
        };

        let dry_run = lookup("DDNS_DRY_RUN")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            provider,
            fields,
            http,
            log_level,
            dry_run,
        })
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return UpdateExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return UpdateExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return UpdateExitCode::RuntimeError.into();
        }
    };

    rt.block_on(run(config)).into()
}

/// Perform the update described by `config`
async fn run(config: Config) -> UpdateExitCode {
    let transport = match ReqwestTransport::new(config.http.clone()) {
        Ok(transport) => transport,
        Err(e) => {
            error!("{}", e);
            return UpdateExitCode::ConfigError;
        }
    };
    let updater = Updater::new(Arc::new(transport));

    let prepared = match updater.prepare(config.provider, &config.fields) {
        Ok(prepared) => prepared,
        Err(e) => {
            error!("{}", e);
            return UpdateExitCode::ConfigError;
        }
    };

    info!(
        "Updating {} via {}",
        config.provider,
        config.provider.conf().name
    );

    if config.dry_run {
        warn!(
            "DRY-RUN: would send {} {}",
            prepared.method(),
            prepared.redacted_url()
        );
        return UpdateExitCode::Accepted;
    }

    match updater.send(&prepared).await {
        Ok(outcome) if outcome.success => {
            info!("Update accepted: {}", outcome.body.trim());
            UpdateExitCode::Accepted
        }
        Ok(outcome) => {
            error!(
                "Update rejected (HTTP {}): {}",
                outcome.status,
                outcome.body.trim()
            );
            UpdateExitCode::Rejected
        }
        Err(e) => {
            error!("Update failed: {}", e);
            UpdateExitCode::RuntimeError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_fields_come_from_prefixed_variables() {
        let config = load(&[
            ("DDNS_PROVIDER", "no_ip"),
            ("DDNS_USERNAME", "alice"),
            ("DDNS_PASSWORD", "s3cret"),
            ("DDNS_IP_ADDRESS", "1.2.3.4"),
            ("DDNS_IPV6_ADDRESS", ""),
        ])
        .unwrap();

        assert_eq!(config.provider, Provider::NoIp);
        assert_eq!(config.fields.len(), 3);
        assert_eq!(config.fields["ip_address"], "1.2.3.4");
        assert!(!config.fields.contains_key("ipv6_address"));
        assert_eq!(config.log_level, Level::INFO);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_field_values_are_not_trimmed() {
        let config = load(&[
            ("DDNS_PROVIDER", "no_ip"),
            ("DDNS_USERNAME", "alice"),
            ("DDNS_PASSWORD", " pass phrase "),
            ("DDNS_IP_ADDRESS", "   "),
        ])
        .unwrap();

        assert_eq!(config.fields["password"], " pass phrase ");
        assert!(!config.fields.contains_key("ip_address"));
    }

    #[test]
    fn test_provider_is_required_and_checked() {
        assert!(load(&[]).is_err());

        let err = load(&[("DDNS_PROVIDER", "route53")]).unwrap_err();
        assert!(format!("{:#}", err).contains("duckdns"));
    }

    #[test]
    fn test_runtime_settings() {
        let config = load(&[
            ("DDNS_PROVIDER", "duckdns"),
            ("DDNS_HTTP_TIMEOUT_SECS", "5"),
            ("DDNS_USER_AGENT", "probe/1.0"),
            ("DDNS_LOG_LEVEL", "DEBUG"),
            ("DDNS_DRY_RUN", "true"),
        ])
        .unwrap();

        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.user_agent, "probe/1.0");
        assert_eq!(config.log_level, Level::DEBUG);
        assert!(config.dry_run);
    }

    #[test]
    fn test_invalid_runtime_settings() {
        assert!(load(&[("DDNS_PROVIDER", "duckdns"), ("DDNS_HTTP_TIMEOUT_SECS", "soon")]).is_err());
        assert!(load(&[("DDNS_PROVIDER", "duckdns"), ("DDNS_HTTP_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("DDNS_PROVIDER", "duckdns"), ("DDNS_LOG_LEVEL", "loud")]).is_err());
    }

    #[tokio::test]
    async fn test_validation_failure_exits_before_sending() {
        let config = load(&[("DDNS_PROVIDER", "duckdns"), ("DDNS_HOST", "myhost")]).unwrap();
        assert_eq!(run(config).await, UpdateExitCode::ConfigError);
    }

    #[tokio::test]
    async fn test_dry_run_sends_nothing() {
        let config = load(&[
            ("DDNS_PROVIDER", "freedns"),
            ("DDNS_TOKEN", "abcd1234"),
            ("DDNS_DRY_RUN", "1"),
        ])
        .unwrap();
        assert_eq!(run(config).await, UpdateExitCode::Accepted);
    }
}
