//! Stateless request builder and response parser for the Mandrill API.
//!
//! # Design
//! `MandrillClient` holds the base URL and API key and nothing else. Each
//! whitelist endpoint is split into a `build_*` method that validates its
//! inputs and produces an `HttpRequest`, and a `parse_*` method that consumes
//! the `HttpResponse`. `MandrillApi` glues the two halves to a `Transport`;
//! callers who run their own I/O can use this type directly.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{ApiError, MandrillError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AddParams, AddResponse, DeleteResponse, EmailParams, Keyed, WhitelistEntry};
use crate::validate::require_non_empty;

/// Retrieves the rejection whitelist, filtered by address or prefix.
/// Mandrill returns at most 1000 entries.
pub const WHITELISTS_LIST_ENDPOINT: &str = "/whitelists/list.json";
/// Whitelists an address, removing any blacklist entry for it.
pub const WHITELISTS_ADD_ENDPOINT: &str = "/whitelists/add.json";
/// Removes an address from the whitelist.
pub const WHITELISTS_DELETE_ENDPOINT: &str = "/whitelists/delete.json";

/// Synchronous, stateless client for the Mandrill API.
#[derive(Clone)]
pub struct MandrillClient {
    base_url: String,
    key: String,
}

impl std::fmt::Debug for MandrillClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MandrillClient")
            .field("base_url", &self.base_url)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl MandrillClient {
    pub fn new(base_url: &str, key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a POST for any endpoint, merging the API key into `params`.
    pub fn build_request<P: Serialize>(&self, endpoint: &str, params: &P) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&Keyed {
            key: &self.key,
            params,
        })
        .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{endpoint}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        })
    }

    /// Decode a 200 body into `T`, or map the failure to an `ApiError`.
    pub fn parse_response<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn build_whitelists_list(&self, email: &str) -> Result<HttpRequest, ApiError> {
        require_non_empty(email, "email")?;
        self.build_request(
            WHITELISTS_LIST_ENDPOINT,
            &EmailParams {
                email: email.to_string(),
            },
        )
    }

    pub fn build_whitelists_add(&self, email: &str, comment: &str) -> Result<HttpRequest, ApiError> {
        require_non_empty(email, "email")?;
        require_non_empty(comment, "comment")?;
        self.build_request(
            WHITELISTS_ADD_ENDPOINT,
            &AddParams {
                email: email.to_string(),
                comment: comment.to_string(),
            },
        )
    }

    pub fn build_whitelists_delete(&self, email: &str) -> Result<HttpRequest, ApiError> {
        require_non_empty(email, "email")?;
        self.build_request(
            WHITELISTS_DELETE_ENDPOINT,
            &EmailParams {
                email: email.to_string(),
            },
        )
    }

    pub fn parse_whitelists_list(&self, response: HttpResponse) -> Result<Vec<WhitelistEntry>, ApiError> {
        self.parse_response(response)
    }

    pub fn parse_whitelists_add(&self, response: HttpResponse) -> Result<bool, ApiError> {
        self.parse_response::<AddResponse>(response).map(|r| r.added)
    }

    pub fn parse_whitelists_delete(&self, response: HttpResponse) -> Result<bool, ApiError> {
        self.parse_response::<DeleteResponse>(response).map(|r| r.deleted)
    }
}

/// Map a non-200 response to `Vendor` when it carries Mandrill's error
/// payload, `HttpError` otherwise.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == 200 {
        return Ok(());
    }
    match serde_json::from_str::<MandrillError>(&response.body) {
        Ok(err) if err.status == "error" => {
            warn!(status = response.status, name = %err.name, code = err.code, "mandrill returned an error");
            Err(ApiError::Vendor(err))
        }
        _ => Err(ApiError::HttpError {
            status: response.status,
            body: response.body.clone(),
        }),
    }
}
