// # HTTP Transport Trait
//
// Defines the one capability the updater needs from the outside world:
// send a single HTTP request and hand back status + body text.
//
// ## Implementations
//
// - reqwest: `dyndns-transport-http` crate
// - Tests: recording doubles in `tests/common`
//
// ## Usage
//
// ```rust,ignore
// use dyndns_core::{HttpMethod, HttpTransport};
//
// async fn probe(transport: &dyn HttpTransport) -> dyndns_core::Result<()> {
//     let url = url::Url::parse("https://www.duckdns.org/update?verbose=true").unwrap();
//     let response = transport.execute(HttpMethod::Get, &url).await?;
//     println!("{} {}", response.status, response.body);
//     Ok(())
// }
// ```

use crate::provider::HttpMethod;
use async_trait::async_trait;
use url::Url;

/// Completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Final status code (after any redirects the transport followed)
    pub status: u16,
    /// Full body decoded as text
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Trait for HTTP transport implementations
///
/// # Thread Safety
///
/// One transport is typically shared by every concurrent update, so
/// implementations must be `Send + Sync`. Connection pooling, TLS, redirects
/// and timeouts are the transport's business.
///
/// # Contract
///
/// - Perform exactly one request per call. No retries.
/// - A non-2xx status is a normal response, not an error.
/// - Failure to complete the exchange (connect, timeout, body decode) is
///   returned as [`Error::Transport`](crate::Error::Transport) wrapping the
///   underlying error.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one request and read the whole response body
    async fn execute(&self, method: HttpMethod, url: &Url) -> Result<HttpResponse, crate::Error>;

    /// Transport name (for logging/debugging)
    fn transport_name(&self) -> &'static str;
}
