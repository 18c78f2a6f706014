//! LINE webhook signature verification.
//!
//! LINE signs each webhook request body with HMAC-SHA256 keyed by the channel
//! secret and sends the base64 digest in the `X-Line-Signature` header.
//! Reference: https://developers.line.biz/en/reference/messaging-api/#signature-validation

use axum::http::HeaderMap;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Verify a LINE webhook signature.
///
/// # Arguments
///
/// * `channel_secret` - The channel secret shared with LINE
/// * `signature` - Base64 value of the `X-Line-Signature` header
/// * `body` - The raw request body, exactly as received
///
/// # Returns
///
/// `true` only if `signature` decodes and matches the HMAC of `body`.
/// Malformed base64 is reported as `false`.
pub fn verify_signature(channel_secret: &[u8], signature: &str, body: &[u8]) -> bool {
    let provided = match BASE64.decode(signature) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, signature_length = signature.len(), "line_signature_malformed");
            return false;
        }
    };

    let mut mac = match HmacSha256::new_from_slice(channel_secret) {
        Ok(m) => m,
        Err(_) => {
            warn!("line_signature_invalid_key");
            return false;
        }
    };
    mac.update(body);

    // verify_slice compares in constant time
    let valid = mac.verify_slice(&provided).is_ok();

    if !valid {
        warn!(
            provided_length = provided.len(),
            body_length = body.len(),
            "line_signature_mismatch"
        );
    }

    valid
}

/// Compute the base64 signature LINE would send for `body`.
///
/// Returns an empty string if the key is rejected; an empty signature never
/// verifies.
pub fn sign(channel_secret: &[u8], body: &[u8]) -> String {
    let mut mac = match HmacSha256::new_from_slice(channel_secret) {
        Ok(m) => m,
        Err(_) => {
            warn!("line_signature_invalid_key");
            return String::new();
        }
    };
    mac.update(body);
    BASE64.encode(mac.finalize().into_bytes())
}

/// Look up the signature header.
///
/// Header names are case-insensitive, so both `X-Line-Signature` and
/// `x-line-signature` resolve here regardless of how a gateway rewrote them.
pub fn signature_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok())
}
