//! Test doubles and common utilities for contract tests
//!
//! These doubles stand in for the HTTP transport so the updater can be
//! exercised without a network.

#![allow(dead_code)]

use dyndns_core::{Error, FieldMap, HttpMethod, HttpResponse, HttpTransport, Result, Url};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Length-36 Duck DNS token used across tests
pub const DUCKDNS_TOKEN: &str = "123456781234123412341234567890123456";

/// A transport that answers with a canned response and records every call
pub struct RecordingTransport {
    /// Response returned for every request
    response: HttpResponse,
    /// Call counter for execute()
    call_count: Arc<AtomicUsize>,
    /// Recorded (method, url) pairs
    requests: Arc<Mutex<Vec<(HttpMethod, Url)>>>,
}

impl RecordingTransport {
    /// Create a transport that always answers `status` with `body`
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            response: HttpResponse::new(status, body),
            call_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shorthand for a 200 response
    pub fn ok(body: &str) -> Self {
        Self::new(200, body)
    }

    /// Get the number of times execute() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get every request seen so far
    pub fn requests(&self) -> Vec<(HttpMethod, Url)> {
        self.requests.lock().unwrap().clone()
    }

    /// The single request seen so far
    pub fn only_request(&self) -> (HttpMethod, Url) {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait::async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, method: HttpMethod, url: &Url) -> Result<HttpResponse> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((method, url.clone()));
        Ok(self.response.clone())
    }

    fn transport_name(&self) -> &'static str {
        "recording"
    }
}

/// Error type used to check that transport failures are not rewrapped
#[derive(Debug, thiserror::Error)]
#[error("connection reset by test")]
pub struct ConnectionReset;

/// A transport whose every request fails
pub struct FailingTransport {
    call_count: Arc<AtomicUsize>,
}

impl FailingTransport {
    pub fn new() -> Self {
        Self {
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl HttpTransport for FailingTransport {
    async fn execute(&self, _method: HttpMethod, _url: &Url) -> Result<HttpResponse> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Err(Error::transport(ConnectionReset))
    }

    fn transport_name(&self) -> &'static str {
        "failing"
    }
}

/// Build a field map from string pairs
pub fn fields(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A complete, valid field map for every provider, with both addresses set
pub fn complete_fields(provider: dyndns_core::Provider) -> FieldMap {
    use dyndns_core::Provider;

    let mut data = match provider {
        Provider::Duckdns => fields(&[("host", "myhost"), ("token", DUCKDNS_TOKEN)]),
        Provider::Freedns | Provider::FreednsIpv6 => fields(&[("token", "abcd1234")]),
        Provider::Mythicbeasts | Provider::Anydns => fields(&[
            ("domain", "home.example.com"),
            ("username", "alice"),
            ("password", "s3cret"),
        ]),
        Provider::Namecheap => fields(&[
            ("host", "www"),
            ("domain", "example.com"),
            ("password", "s3cret"),
        ]),
        Provider::NoIp => fields(&[
            ("domain", "home.ddns.net"),
            ("username", "alice"),
            ("password", "s3cret"),
        ]),
        Provider::Custom => fields(&[("url", "https://ddns.example.com/update?key=abc")]),
    };
    data.insert("ip_address".into(), "1.2.3.4".into());
    data.insert("ipv6_address".into(), "2001:db8::1".into());
    data
}
