//! HTTP transport types and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. The executor builds an
//! `HttpRequest`, hands it to whatever `Transport` the client was constructed
//! with, and decodes the returned `HttpResponse`. Swapping the transport is
//! how tests observe and script the network without touching it.
//!
//! The transport never interprets the HTTP status. The remote service reports
//! failures inside the JSON envelope (often alongside a 4xx status), so the
//! body must reach the envelope decoder either way.

use std::fmt;

/// HTTP method for a request.
///
/// Only `Get` is wired through the executor. `Post` is recognized so that
/// callers get an explicit `UnsupportedMethod` error instead of a silent
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and already carries the encoded query string.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Error produced by a `Transport`. Carried to the caller unchanged.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Performs one HTTP round-trip.
///
/// Implementations must return non-2xx responses as `Ok` data; an `Err` means
/// no usable response was received at all (connection refused, timeout, TLS
/// failure, unreadable body).
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
