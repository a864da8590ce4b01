// Cookie signing. No input validation happens here; `handshake::sign_request`
// checks usernames and key lengths before calling in.

use chrono::{DateTime, Utc};

use super::{Payload, SignedToken, Tag};
use crate::crypto::{codec, hmac};
use crate::error::SignError;

/// Build a cookie for `username` that expires `ttl_secs` after `now`.
pub fn sign_token(
    key: &str,
    username: &str,
    integration_key: &str,
    tag: Tag,
    ttl_secs: i64,
    now: DateTime<Utc>,
) -> Result<SignedToken, SignError> {
    let expires_at = now
        .timestamp()
        .checked_add(ttl_secs)
        .ok_or(SignError::Unknown)?;

    let payload = Payload {
        username: username.to_string(),
        integration_key: integration_key.to_string(),
        expires_at,
    };
    let payload_b64 = codec::encode(payload.to_string().as_bytes());
    let signature_hex = hmac::sign_hex(key, &super::signed_part(tag.as_str(), &payload_b64))?;

    Ok(SignedToken {
        tag,
        payload_b64,
        signature_hex,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const IKEY: &str = "DIXXXXXXXXXXXXXXXXXX";
    const SKEY: &str = "deadbeefdeadbeefdeadbeefdeadbeefdeadbeef";
    const AKEY: &str = "useacustomerprovidedapplicationsecretkey";

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn transaction_cookie_matches_known_vector() {
        let token = sign_token(SKEY, "testuser", IKEY, Tag::Transaction, 300, at(1300157874 - 75))
            .unwrap();
        assert_eq!(
            token.to_string(),
            "TX|dGVzdHVzZXJ8RElYWFhYWFhYWFhYWFhYWFhYWFh8MTMwMDE1ODA5OQ==|815423f20909dbff2bc4962fdc3031d5f673bc1b"
        );
    }

    #[test]
    fn application_cookie_matches_known_vector() {
        let token =
            sign_token(AKEY, "testuser", IKEY, Tag::Application, 3600, at(1300157874 - 75))
                .unwrap();
        assert_eq!(
            token.to_string(),
            "APP|dGVzdHVzZXJ8RElYWFhYWFhYWFhYWFhYWFhYWFh8MTMwMDE2MTM5OQ==|c3648befd92041b26197af8a976300542f00cd5a"
        );
    }

    #[test]
    fn expiry_is_now_plus_ttl() {
        let token = sign_token(SKEY, "alice", IKEY, Tag::AuthResponse, 42, at(1_000)).unwrap();
        let decoded = codec::decode(&token.payload_b64).unwrap();
        assert_eq!(decoded, format!("alice|{IKEY}|1042").into_bytes());
    }

    #[test]
    fn expiry_overflow_is_unknown_error() {
        let err = sign_token(SKEY, "alice", IKEY, Tag::Transaction, i64::MAX, at(1)).unwrap_err();
        assert_eq!(err, SignError::Unknown);
    }
}
