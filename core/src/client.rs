//! The user-facing client handle.
//!
//! # Design
//! `Client` holds the configuration and the `Dispatcher`. Typed lookups build
//! an endpoint URL and parameter set, submit a `Query`, and unpack the piece
//! of the payload they exist for. They add no concurrency or decoding logic
//! of their own; every call, from every thread, goes through the same worker.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::http::Transport;
use crate::params::Params;
use crate::transport::UreqTransport;
use crate::types::{Category, Venue, VenueResponse};
use crate::worker::{Dispatcher, Query};

/// Handle to the venue API.
///
/// Cheap to share: `&Client` (or `Arc<Client>`) can be used from any number
/// of threads. Requests are still issued one at a time, in the order the
/// worker receives them.
#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    dispatcher: Dispatcher,
}

impl Client {
    /// Client for the public API with the default configuration and a
    /// `ureq`-backed transport. The worker starts immediately.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        Self::with_transport(
            client_id,
            client_secret,
            ClientConfig::default(),
            Arc::new(UreqTransport::new()),
        )
    }

    pub fn with_config(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        Self::with_transport(client_id, client_secret, config, Arc::new(UreqTransport::new()))
    }

    /// Fails only if the worker thread cannot be spawned.
    pub fn with_transport(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let executor = Executor::new(config.clone(), client_id, client_secret, transport);
        let dispatcher = Dispatcher::spawn(executor).map_err(Error::Worker)?;
        Ok(Self { config, dispatcher })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Look up a venue by id.
    pub fn venue(&self, venue_id: &str) -> Result<Venue> {
        let url = self
            .config
            .endpoint(&format!("venues/{}", urlencoding::encode(venue_id)));
        self.submit(Query::get(url, Params::new()))?
            .venue
            .ok_or(Error::MissingField("venue"))
    }

    /// The full venue category tree.
    pub fn categories(&self) -> Result<Vec<Category>> {
        let url = self.config.endpoint("venues/categories");
        Ok(self
            .submit(Query::get(url, Params::new()))?
            .categories
            .unwrap_or_default())
    }

    /// Submit an arbitrary query and wait for its decoded payload.
    pub fn submit(&self, query: Query) -> Result<VenueResponse> {
        self.dispatcher.submit(query)
    }

    /// Stop the worker after it drains queued queries. Later calls return
    /// `Error::Closed`. Dropping the client closes it too.
    pub fn close(&self) {
        self.dispatcher.close();
    }

    pub fn is_closed(&self) -> bool {
        self.dispatcher.is_closed()
    }
}
