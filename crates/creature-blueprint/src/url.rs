//! Blueprint URL transport.
//!
//! A blueprint URL is `talespire://creature-blueprint/<payload>`, where the
//! payload is standard padded base64 with every `/` replaced by `_` so it
//! stays a single path segment.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::codec::{decode_blueprint, encode_blueprint};
use crate::error::UrlError;
use crate::limits::URL_PREFIX;
use crate::model::Blueprint;

/// Extracts and base64-decodes the payload of a blueprint URL.
///
/// Only the last `/`-separated segment is used, so a bare payload without the
/// scheme prefix is accepted too.
pub fn payload_from_url(url: &str) -> Result<Vec<u8>, UrlError> {
    let segment = url.trim().rsplit('/').next().unwrap_or_default();
    if segment.is_empty() {
        return Err(UrlError::MissingPayload);
    }
    STANDARD
        .decode(segment.replace('_', "/"))
        .map_err(|e| UrlError::Base64(e.to_string()))
}

/// Wraps a raw payload into a blueprint URL.
pub fn url_from_payload(payload: &[u8]) -> String {
    let encoded = STANDARD.encode(payload).replace('/', "_");
    format!("{URL_PREFIX}{encoded}")
}

/// Decodes a blueprint from its URL.
pub fn decode_url(url: &str) -> Result<Blueprint, UrlError> {
    let payload = payload_from_url(url)?;
    Ok(decode_blueprint(&payload)?)
}

/// Encodes a blueprint into its URL.
pub fn encode_url(blueprint: &Blueprint) -> Result<String, UrlError> {
    let payload = encode_blueprint(blueprint)?;
    Ok(url_from_payload(&payload))
}
