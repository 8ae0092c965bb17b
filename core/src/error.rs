//! Error types for the Foursquare client.
//!
//! # Design
//! Every failure is returned to the caller that submitted the query, through
//! the same reply path as a success. Variants separate "no response at all"
//! (`Transport`) from "response we could not read" (`Decode`) from "response
//! the service marked as failed" (`Api`), so callers can branch without
//! matching on message text.

use thiserror::Error;

use crate::http::{HttpMethod, TransportError};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The transport produced no response. The transport's own error is the
    /// source, untouched.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// The body was not a response envelope.
    #[error("failed to decode response envelope: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope's `meta.code` was not 200.
    #[error("API error {code}{}", describe(.error_type, .error_detail))]
    Api {
        code: i64,
        error_type: Option<String>,
        error_detail: Option<String>,
    },

    #[error("HTTP method {0} is not supported")]
    UnsupportedMethod(HttpMethod),

    /// The client was closed before this query could be queued.
    #[error("client is closed")]
    Closed,

    /// The worker thread died (a transport panicked) before replying. The
    /// client accepts no further work.
    #[error("request worker exited unexpectedly")]
    WorkerExited,

    /// The worker thread could not be started.
    #[error("failed to start worker thread: {0}")]
    Worker(#[source] std::io::Error),

    /// A successful envelope lacked the field the lookup exists to return.
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

impl Error {
    /// The API status code, for `Api` errors.
    pub fn code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

fn describe(error_type: &Option<String>, error_detail: &Option<String>) -> String {
    match (error_type, error_detail) {
        (Some(t), Some(d)) => format!(" ({t}): {d}"),
        (Some(t), None) => format!(" ({t})"),
        (None, Some(d)) => format!(": {d}"),
        (None, None) => String::new(),
    }
}
