//! Webhook signature verification.
//!
//! GitHub signs each delivery with HMAC-SHA256 over the raw request body and
//! sends the result as `X-Hub-Signature-256: sha256=<hex>`. Verification must
//! happen on the exact bytes received, before the body is parsed, and must
//! not leak how many leading bytes of the signature matched.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verify a `sha256=<hex>` signature header against the raw body.
///
/// Returns `false` for a missing header, a header without the `sha256=`
/// prefix, or non-hex payload — a malformed signature is a rejection, not a
/// skipped check. The underlying comparison (`Mac::verify_slice`) is
/// constant-time.
pub fn verify(secret: &str, body: &[u8], signature_header: Option<&str>) -> bool {
    let Some(header) = signature_header else {
        return false;
    };
    let Some(hex_digest) = header.strip_prefix("sha256=") else {
        return false;
    };
    let Ok(expected) = hex::decode(hex_digest) else {
        return false;
    };

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        // new_from_slice accepts keys of any length for HMAC; unreachable,
        // but a refused key must reject rather than panic.
        Err(_) => return false,
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Compute the `sha256=<hex>` header value for a body. Used by tests and by
/// anything that needs to self-sign a payload.
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("infallible: HMAC accepts keys of any length");
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
