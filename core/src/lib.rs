//! Blocking client for the Foursquare venue API.
//!
//! # Overview
//! `Client` authenticates every call with a client id/secret pair, issues it
//! over a pluggable `Transport`, and decodes the service's JSON envelope into
//! typed payloads.
//!
//! # Design
//! - All calls funnel through one worker thread per client (`worker`), so
//!   exactly one request is in flight at a time and requests are served in
//!   the order the worker receives them, however many threads share the
//!   client.
//! - The `Executor` injects `v`, `client_id` and `client_secret` on every
//!   call and only implements GET; POST is an explicit `UnsupportedMethod`.
//! - `meta.code == 200` is the only success signal. Failures come back as
//!   structured `Error` variants, never as an unlabelled string.
//! - Endpoint and version live in a per-client `ClientConfig`, not globals.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod http;
pub mod params;
pub mod transport;
pub mod types;
pub mod worker;

pub use client::Client;
pub use config::ClientConfig;
pub use envelope::decode_envelope;
pub use error::{Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use params::Params;
pub use transport::UreqTransport;
pub use types::{Category, Contact, Icon, Location, Venue, VenueResponse};
pub use worker::Query;
