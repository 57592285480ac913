//! Whitelist operations over a `Transport`.
//!
//! # Design
//! Every operation is the matching `MandrillClient` build method, one
//! transport round-trip, then the matching parse method. The client's build
//! methods validate their inputs, so an empty field never reaches the
//! transport. `call_json` is the same round-trip for arbitrary endpoints.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::client::MandrillClient;
use crate::config::MandrillConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::WhitelistEntry;
use crate::validate::require_non_empty;

/// Mandrill API handle: a request builder plus the transport that runs it.
///
/// Holds no mutable state, so it can be shared across threads whenever the
/// transport can.
#[derive(Debug, Clone)]
pub struct MandrillApi<T> {
    client: MandrillClient,
    transport: T,
}

#[cfg(feature = "ureq-transport")]
impl MandrillApi<crate::http::UreqTransport> {
    pub fn from_config(config: &MandrillConfig) -> Result<Self, ApiError> {
        Self::new(config, crate::http::UreqTransport::new(config.timeout))
    }
}

impl<T: Transport> MandrillApi<T> {
    pub fn new(config: &MandrillConfig, transport: T) -> Result<Self, ApiError> {
        require_non_empty(&config.key, "key")?;
        require_non_empty(&config.base_url, "base_url")?;
        Ok(Self {
            client: MandrillClient::new(&config.base_url, &config.key),
            transport,
        })
    }

    pub fn client(&self) -> &MandrillClient {
        &self.client
    }

    /// POST `params` to `endpoint` and decode the JSON reply into `R`.
    pub fn call_json<P, R>(&self, endpoint: &str, params: &P) -> Result<R, ApiError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = self.client.build_request(endpoint, params)?;
        let response = self.send(&request)?;
        self.client.parse_response(response)
    }

    /// List whitelist entries matching an address or prefix.
    pub fn whitelists_list(&self, email: &str) -> Result<Vec<WhitelistEntry>, ApiError> {
        let request = self.client.build_whitelists_list(email)?;
        let response = self.send(&request)?;
        self.client.parse_whitelists_list(response)
    }

    /// Whitelist `email`. Returns Mandrill's `added` flag.
    pub fn whitelists_add(&self, email: &str, comment: &str) -> Result<bool, ApiError> {
        let request = self.client.build_whitelists_add(email, comment)?;
        let response = self.send(&request)?;
        self.client.parse_whitelists_add(response)
    }

    /// Remove `email` from the whitelist. Returns Mandrill's `deleted` flag.
    pub fn whitelists_delete(&self, email: &str) -> Result<bool, ApiError> {
        let request = self.client.build_whitelists_delete(email)?;
        let response = self.send(&request)?;
        self.client.parse_whitelists_delete(response)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(url = %request.url, "calling mandrill");
        let response = self.transport.execute(request)?;
        debug!(url = %request.url, status = response.status, "mandrill responded");
        Ok(response)
    }
}
