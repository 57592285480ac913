//! Client configuration.

use std::time::Duration;

use crate::error::ApiError;
use crate::validate::require_non_empty;

pub const DEFAULT_BASE_URL: &str = "https://mandrillapp.com/api/1.0";

pub const KEY_VAR: &str = "MANDRILL_KEY";
pub const BASE_URL_VAR: &str = "MANDRILL_BASE_URL";
pub const TIMEOUT_VAR: &str = "MANDRILL_TIMEOUT_SECS";

/// Settings needed to talk to Mandrill.
#[derive(Clone)]
pub struct MandrillConfig {
    pub key: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for MandrillConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MandrillConfig")
            .field("key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl MandrillConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read `MANDRILL_KEY`, `MANDRILL_BASE_URL` and `MANDRILL_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let key = lookup(KEY_VAR).unwrap_or_default();
        require_non_empty(&key, "key")?;
        let mut config = Self::new(key);
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.is_empty()) {
            config.base_url = base_url;
        }
        if let Some(raw) = lookup(TIMEOUT_VAR).filter(|v| !v.is_empty()) {
            let secs: u64 = raw
                .parse()
                .map_err(|e| ApiError::Config(format!("{TIMEOUT_VAR}={raw:?}: {e}")))?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }
}
