// Cookie verification.
//
// Checks run in a fixed order and stop at the first failure:
//   shape -> signature -> tag -> payload decode -> integration key -> expiry
//
// The signature is checked before anything inside the payload is trusted.

use chrono::{DateTime, Utc};

use super::{Tag, FIELD_DELIMITER};
use crate::crypto::{codec, hmac};
use crate::error::VerifyError;

/// Verify one cookie and return the username it carries.
///
/// Expiry is exclusive: a cookie is already expired at `now == expires_at`.
pub fn verify_token(
    key: &str,
    text: &str,
    expected_tag: Tag,
    integration_key: &str,
    now: DateTime<Utc>,
) -> Result<String, VerifyError> {
    let [tag, payload_b64, signature_hex] =
        split_exact(text).ok_or(VerifyError::MalformedToken)?;

    if !hmac::verify_hex(key, &super::signed_part(tag, payload_b64), signature_hex) {
        return Err(VerifyError::BadSignature);
    }

    if tag != expected_tag.as_str() {
        return Err(VerifyError::WrongTag);
    }

    let decoded = codec::decode(payload_b64).map_err(|_| VerifyError::MalformedToken)?;
    let payload = String::from_utf8(decoded).map_err(|_| VerifyError::MalformedPayload)?;
    let [username, payload_ikey, expires_at] =
        split_exact(&payload).ok_or(VerifyError::MalformedPayload)?;

    if payload_ikey != integration_key {
        return Err(VerifyError::IntegrationMismatch);
    }

    let expires_at: i64 = expires_at
        .parse()
        .map_err(|_| VerifyError::MalformedPayload)?;
    if now.timestamp() >= expires_at {
        return Err(VerifyError::Expired);
    }

    Ok(username.to_string())
}

/// Split on `|` into exactly three fields.
fn split_exact(text: &str) -> Option<[&str; 3]> {
    let mut fields = text.split(FIELD_DELIMITER);
    match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(a), Some(b), Some(c), None) => Some([a, b, c]),
        _ => None,
    }
}
