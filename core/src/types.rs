//! Request and response DTOs for the whitelist endpoints.
//!
//! # Design
//! Add and delete responses decode straight into small typed records. A
//! missing or non-boolean `added`/`deleted` field is then an ordinary
//! deserialization error instead of something to check by hand.

use serde::{Deserialize, Serialize};

use crate::time::ApiTime;

/// One address on the rejection whitelist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WhitelistEntry {
    pub email: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub created_at: ApiTime,
}

/// Parameters for `/whitelists/list.json` and `/whitelists/delete.json`.
#[derive(Debug, Clone, Serialize)]
pub struct EmailParams {
    pub email: String,
}

/// Parameters for `/whitelists/add.json`.
#[derive(Debug, Clone, Serialize)]
pub struct AddParams {
    pub email: String,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddResponse {
    #[serde(default)]
    pub email: String,
    pub added: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    #[serde(default)]
    pub email: String,
    pub deleted: bool,
}

/// Request body: the endpoint's parameters with the API key merged in.
#[derive(Debug, Serialize)]
pub(crate) struct Keyed<'a, P> {
    pub key: &'a str,
    #[serde(flatten)]
    pub params: &'a P,
}
