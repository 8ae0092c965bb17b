//! Decoder for the two-level response envelope.
//!
//! Every response has the shape
//! `{"meta": {"code": 200, ...}, "notifications": [...], "response": {...}}`.
//! `meta.code` is the only success signal; the HTTP status is not consulted.

use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::VenueResponse;

pub const SUCCESS_CODE: i64 = 200;

#[derive(Debug, Deserialize)]
struct Envelope {
    meta: Meta,
    // Parsed so a malformed envelope is still rejected, then dropped.
    #[allow(dead_code)]
    notifications: Option<IgnoredAny>,
    #[serde(default)]
    response: VenueResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Meta {
    code: i64,
    error_type: Option<String>,
    error_detail: Option<String>,
}

/// Decode `body` and return its payload if `meta.code` is 200.
///
/// Malformed JSON or a missing `meta` is a `Decode` error. Any other code is
/// an `Api` error carrying the code and whatever detail `meta` provided; the
/// payload of a failed envelope is discarded.
pub fn decode_envelope(body: &[u8]) -> Result<VenueResponse> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    if envelope.meta.code != SUCCESS_CODE {
        return Err(Error::Api {
            code: envelope.meta.code,
            error_type: envelope.meta.error_type,
            error_detail: envelope.meta.error_detail,
        });
    }
    Ok(envelope.response)
}
