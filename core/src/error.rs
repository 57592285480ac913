//! Error types for the Mandrill client.
//!
//! # Design
//! Local validation failures get their own variant so callers can tell "you
//! passed an empty field" apart from anything that happened on the wire.
//! Mandrill reports failures as a JSON payload on a non-200 status; those
//! land in `Vendor`. Any other non-200 response keeps its raw status and body
//! in `HttpError` for debugging.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the client and its transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required string parameter was empty. No request was sent.
    #[error("{0} cannot be blank")]
    MissingField(&'static str),

    /// The request never produced an HTTP response (DNS, connect, TLS, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    /// Mandrill answered with its error payload, e.g. `Invalid_Key`.
    #[error("mandrill error: {0}")]
    Vendor(MandrillError),

    /// A non-200 status whose body was not a Mandrill error payload.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request parameters could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// Client configuration was unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// True when the error was raised locally before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::MissingField(_))
    }

    /// The vendor error name (`Invalid_Key`, `ValidationError`, ...) if any.
    pub fn vendor_name(&self) -> Option<&str> {
        match self {
            ApiError::Vendor(e) => Some(&e.name),
            _ => None,
        }
    }
}

/// Error payload Mandrill returns alongside a non-200 status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandrillError {
    pub status: String,
    pub code: i64,
    pub name: String,
    pub message: String,
}

impl fmt::Display for MandrillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.code, self.message)
    }
}
