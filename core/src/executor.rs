//! Turns a `Query` into one HTTP round-trip and decodes the result.
//!
//! # Design
//! The executor is owned by the worker thread and is the only code that
//! touches the transport. Authentication and version parameters are injected
//! here on every call, overwriting anything the caller supplied, so typed
//! lookups never handle credentials.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::ClientConfig;
use crate::envelope::decode_envelope;
use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest, Transport};
use crate::params::Params;
use crate::types::VenueResponse;
use crate::worker::Query;

pub struct Executor {
    config: ClientConfig,
    client_id: String,
    client_secret: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.config)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl Executor {
    pub fn new(
        config: ClientConfig,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run `query` to completion. POST fails before any I/O.
    pub fn execute(&self, query: Query) -> Result<VenueResponse> {
        let Query { url, params: extra, method } = query;

        // A query string already on the URL is folded into the parameters so
        // the credentials below overwrite it like any caller value.
        let (url, mut params) = match url.split_once('?') {
            Some((base, existing)) => (base.to_string(), Params::parse(existing)),
            None => (url, Params::new()),
        };
        params.merge(extra);

        params.set("v", self.config.version.as_str());
        params.set("client_id", self.client_id.as_str());
        params.set("client_secret", self.client_secret.as_str());
        if let Some(mode) = &self.config.mode {
            params.set("m", mode.as_str());
        }

        match method {
            HttpMethod::Get => {}
            HttpMethod::Post => return Err(Error::UnsupportedMethod(method)),
        }

        debug!(%method, %url, "dispatching query");
        let request = HttpRequest {
            method,
            url: format!("{url}?{}", params.encode()),
            headers: vec![
                ("accept".to_string(), "application/json".to_string()),
                ("user-agent".to_string(), self.config.user_agent.clone()),
            ],
            body: None,
        };

        let response = self.transport.execute(request).map_err(Error::Transport)?;
        debug!(status = response.status, bytes = response.body.len(), "response received");
        decode_envelope(&response.body)
    }
}
