//! Core traits for the dynamic DNS updater
//!
//! - [`HttpTransport`]: Execute one HTTP request on behalf of the updater

pub mod transport;

pub use transport::{HttpResponse, HttpTransport};
