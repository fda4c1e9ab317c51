//! Update executor
//!
//! The [`Updater`] runs one dynamic DNS update from start to finish:
//!
//! ```text
//! FieldMap ──► validate ──► render ──► HttpTransport ──► SuccessCheck ──► bool
//!             (no I/O)     (no I/O)    (one request)
//! ```
//!
//! ## Phases
//!
//! 1. **Validating**: resolve the provider configuration, check the fields
//!    and apply defaults. Failure returns before any request is sent.
//! 2. **Requesting**: render the URL and issue exactly one request.
//! 3. **Evaluated**: read the body and apply the provider's success check.
//!
//! There are no retries and no timeouts here. Callers own retry policy;
//! the transport owns deadlines.

use crate::config::{FieldMap, UpdateRequest};
use crate::error::Result;
use crate::provider::{HttpMethod, Provider, ProviderConf, ValidatedData};
use crate::render;
use crate::traits::HttpTransport;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Result of a completed update request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Provider that answered
    pub provider: Provider,
    /// Whether the provider accepted the update
    pub success: bool,
    /// HTTP status of the response
    pub status: u16,
    /// Raw response text, kept for diagnostics
    pub body: String,
}

/// Validated and rendered update, ready to send
///
/// Building one performs no I/O. The `Debug` output masks credentials.
#[derive(Clone)]
pub struct PreparedUpdate {
    provider: Provider,
    conf: &'static ProviderConf,
    data: ValidatedData,
    url: Url,
    redacted: String,
}

impl PreparedUpdate {
    /// Validate `fields` for `provider` and render the request URL
    pub fn new(provider: Provider, fields: &FieldMap) -> Result<Self> {
        let conf = provider.conf();
        debug!(provider = %provider, "Validating update fields");
        let data = conf.validate(fields)?;
        let url = conf.render(&data)?;
        let redacted = render::redact(conf, &data)?;

        Ok(Self {
            provider,
            conf,
            data,
            url,
            redacted,
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn method(&self) -> HttpMethod {
        self.conf.method
    }

    /// Request URL, credentials included
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request URL with credentials masked, safe to log
    pub fn redacted_url(&self) -> &str {
        &self.redacted
    }

    /// Fields after validation, defaults applied
    pub fn data(&self) -> &ValidatedData {
        &self.data
    }
}

// Custom Debug implementation that hides credentials
impl fmt::Debug for PreparedUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedUpdate")
            .field("provider", &self.provider)
            .field("method", &self.conf.method)
            .field("url", &self.redacted)
            .finish()
    }
}

/// Dynamic DNS update executor
///
/// Holds only a shared transport, so one `Updater` can serve any number of
/// concurrent updates for any providers.
#[derive(Clone)]
pub struct Updater {
    transport: Arc<dyn HttpTransport>,
}

impl Updater {
    /// Create an updater that sends requests through `transport`
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Validate and render without sending anything
    pub fn prepare(&self, provider: Provider, fields: &FieldMap) -> Result<PreparedUpdate> {
        PreparedUpdate::new(provider, fields)
    }

    /// Send a prepared update and evaluate the response
    ///
    /// Transport errors are returned untouched.
    pub async fn send(&self, prepared: &PreparedUpdate) -> Result<UpdateOutcome> {
        let provider = prepared.provider;
        let conf = prepared.conf;

        debug!(
            "[{}] {} {}",
            conf.name,
            conf.method,
            prepared.redacted_url()
        );

        let response = self.transport.execute(conf.method, &prepared.url).await?;

        debug!(
            "[{}] Response Status: {} Body: {}",
            conf.name, response.status, response.body
        );

        let success = conf.is_success(response.status, &response.body);
        if success {
            info!(provider = %provider, status = response.status, "Dynamic DNS update accepted");
        } else {
            warn!(
                provider = %provider,
                status = response.status,
                "Dynamic DNS update rejected: {}",
                response.body.trim()
            );
        }

        Ok(UpdateOutcome {
            provider,
            success,
            status: response.status,
            body: response.body,
        })
    }

    /// Run one update and return the full outcome
    pub async fn update_outcome(
        &self,
        provider: Provider,
        fields: &FieldMap,
    ) -> Result<UpdateOutcome> {
        let prepared = self.prepare(provider, fields)?;
        self.send(&prepared).await
    }

    /// Run one update and report whether the provider accepted it
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`](crate::Error::Validation) before any request
    /// - [`Error::Template`](crate::Error::Template) for a malformed URL template
    /// - [`Error::Transport`](crate::Error::Transport) when the request failed
    ///
    /// A rejected update is `Ok(false)`.
    pub async fn update(&self, provider: Provider, fields: &FieldMap) -> Result<bool> {
        Ok(self.update_outcome(provider, fields).await?.success)
    }

    /// Run an [`UpdateRequest`]
    pub async fn run(&self, request: &UpdateRequest) -> Result<UpdateOutcome> {
        self.update_outcome(request.provider, &request.fields).await
    }
}

impl fmt::Debug for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Updater")
            .field("transport", &self.transport.transport_name())
            .finish()
    }
}
