//! Per-client configuration.
//!
//! # Design
//! Endpoint, API version and response mode are fields on a value owned by
//! each client rather than process-wide constants, so several independently
//! configured clients can coexist in one process (and tests can point one at
//! a local server). `ClientConfig` deserializes with field defaults, so a host
//! application can embed it in its own config file and set only what differs.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.foursquare.com/v2";

/// Date-stamped API version sent as `v` on every call.
pub const DEFAULT_VERSION: &str = "20150813";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root of the API, without a trailing slash.
    pub base_url: String,
    pub version: String,
    /// Response mode sent as `m` when set (e.g. `"foursquare"` or `"swarm"`).
    pub mode: Option<String>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_VERSION.to_string(),
            mode: None,
            user_agent: concat!("foursquare-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Absolute URL for `path` under `base_url`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
