// HMAC-SHA1 signing over the canonical cookie string.
//
// Keys and messages are hashed as their UTF-8 bytes. Signatures travel as
// 40 lowercase hex characters and are compared as raw 20-byte digests in
// constant time.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;

use crate::error::SignError;

type HmacSha1 = Hmac<Sha1>;

/// Length of a hex-encoded HMAC-SHA1 signature.
pub const SIGNATURE_HEX_LEN: usize = 40;

/// Sign `message` with `key` and return the lowercase hex digest.
pub fn sign_hex(key: &str, message: &str) -> Result<String, SignError> {
    let digest = digest(key, message).ok_or(SignError::Unknown)?;
    Ok(hex::encode(digest))
}

/// Check a hex signature against the digest of `message` under `key`.
///
/// Anything other than exactly 40 lowercase hex characters is rejected
/// before any comparison happens.
pub fn verify_hex(key: &str, message: &str, signature_hex: &str) -> bool {
    if !is_lower_hex(signature_hex) {
        return false;
    }
    let Ok(provided) = hex::decode(signature_hex) else {
        return false;
    };
    let Some(expected) = digest(key, message) else {
        return false;
    };
    expected.as_slice().ct_eq(provided.as_slice()).into()
}

fn digest(key: &str, message: &str) -> Option<Vec<u8>> {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).ok()?;
    mac.update(message.as_bytes());
    Some(mac.finalize().into_bytes().to_vec())
}

fn is_lower_hex(s: &str) -> bool {
    s.len() == SIGNATURE_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKEY: &str = "deadbeefdeadbeefdeadbeefdeadbeefdeadbeef";

    #[test]
    fn rfc2202_vector() {
        let sig = sign_hex("Jefe", "what do ya want for nothing?").unwrap();
        assert_eq!(sig, "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79");
    }

    #[test]
    fn signs_cookie_string() {
        let sig = sign_hex(
            SKEY,
            "TX|dGVzdHVzZXJ8RElYWFhYWFhYWFhYWFhYWFhYWFh8MTMwMDE1ODA5OQ==",
        )
        .unwrap();
        assert_eq!(sig, "815423f20909dbff2bc4962fdc3031d5f673bc1b");
        assert_eq!(sig.len(), SIGNATURE_HEX_LEN);
    }

    #[test]
    fn verify_accepts_own_signature() {
        let sig = sign_hex(SKEY, "APP|payload").unwrap();
        assert!(verify_hex(SKEY, "APP|payload", &sig));
    }

    #[test]
    fn verify_rejects_wrong_key_and_message() {
        let sig = sign_hex(SKEY, "APP|payload").unwrap();
        assert!(!verify_hex("other-key", "APP|payload", &sig));
        assert!(!verify_hex(SKEY, "APP|payloae", &sig));
    }

    #[test]
    fn verify_rejects_non_canonical_hex() {
        let sig = sign_hex(SKEY, "APP|payload").unwrap();
        assert!(!verify_hex(SKEY, "APP|payload", &sig.to_uppercase()));
        assert!(!verify_hex(SKEY, "APP|payload", &sig[..38]));
        assert!(!verify_hex(SKEY, "APP|payload", &format!("{sig}00")));
        assert!(!verify_hex(SKEY, "APP|payload", "SIG"));
        assert!(!verify_hex(SKEY, "APP|payload", ""));
    }
}
