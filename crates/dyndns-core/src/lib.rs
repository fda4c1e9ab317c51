// # dyndns-core
//
// Core library for updating records at dynamic DNS providers.
//
// ## Architecture Overview
//
// - **Provider**: Closed set of supported services
// - **ProviderConf**: Declarative template per provider (URL, method,
//   query parameters, field rules, success check)
// - **registry**: Static Provider → ProviderConf mapping
// - **render**: Pure URL rendering from a template and validated fields
// - **HttpTransport**: Trait for the one HTTP request an update needs
// - **Updater**: Validates, renders, sends, and evaluates one update
//
// ## Design Principles
//
// 1. **Data, not code, per provider**: Adding a provider means adding a
//    table entry; callers never branch on the provider
// 2. **No I/O before validation**: Invalid input never reaches the network
// 3. **Single-shot**: One request per update, no retries, no background tasks
// 4. **Library-First**: The transport and the CLI live in separate crates
//
// ## Example
//
// ```rust,ignore
// use dyndns_core::{FieldMap, Provider, Updater};
//
// let updater = Updater::new(transport);
// let fields = FieldMap::from([
//     ("host".to_string(), "myhost".to_string()),
//     ("token".to_string(), token),
// ]);
// let accepted = updater.update(Provider::Duckdns, &fields).await?;
// ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fields;
pub mod provider;
pub mod registry;
pub mod render;
pub mod traits;

// Re-export core types for convenience
pub use config::{FieldMap, HttpConfig, UpdateRequest};
pub use engine::{PreparedUpdate, UpdateOutcome, Updater};
pub use error::{Error, Result, Violation};
pub use provider::{
    Constraint, FieldRule, HttpMethod, Provider, ProviderConf, SuccessCheck, ValidatedData,
};
pub use traits::{HttpResponse, HttpTransport};
pub use url::Url;
