//! Synchronous client for Mandrill's rejection-whitelist endpoints.
//!
//! # Overview
//! `MandrillClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network. `MandrillApi` pairs it with a
//! `Transport` and exposes one method per endpoint: `whitelists_list`,
//! `whitelists_add` and `whitelists_delete`.
//!
//! # Design
//! - Required string parameters are checked before any request is built;
//!   an empty value fails with `ApiError::MissingField` and performs no I/O.
//! - Responses decode into typed records, so an unexpected shape is an
//!   `ApiError::DeserializationError`, never a panic.
//! - The default `ureq-transport` feature provides a blocking `UreqTransport`.
//!
//! ```no_run
//! use mandrill_core::{MandrillApi, MandrillConfig};
//!
//! let config = MandrillConfig::from_env()?;
//! let api = MandrillApi::from_config(&config)?;
//! for entry in api.whitelists_list("example.com")? {
//!     println!("{} ({}) since {}", entry.email, entry.detail, entry.created_at);
//! }
//! # Ok::<(), mandrill_core::ApiError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod time;
pub mod types;
pub mod validate;

pub use api::MandrillApi;
pub use client::MandrillClient;
pub use config::MandrillConfig;
pub use error::{ApiError, MandrillError};
#[cfg(feature = "ureq-transport")]
pub use http::UreqTransport;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use time::ApiTime;
pub use types::{AddResponse, DeleteResponse, WhitelistEntry};
