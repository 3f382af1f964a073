// =============================================================================
// Webhook signature — base64(HMAC-SHA256(channel_secret, raw_body))
// =============================================================================
//
// Verification goes through `Mac::verify_slice`, which compares in constant
// time. An unset channel secret rejects every delivery.
// =============================================================================

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Check `signature` (as sent in `X-Line-Signature`) against `body`.
pub fn verify(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    if channel_secret.is_empty() {
        return false;
    }
    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Produce the signature LINE would send for `body`.
#[cfg(test)]
pub fn sign(channel_secret: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(channel_secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}
