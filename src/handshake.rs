// The two entry points a relying party calls.
//
//   sign_request:    username -> "TX|...|sig:APP|...|sig"  (handed to the iframe)
//   verify_response: "AUTH|...|sig:APP|...|sig" -> username (posted back by the iframe)
//
// The AUTH cookie is minted by Duo with the shared secret key; the APP cookie
// is our own, echoed back unchanged. A response is only accepted when both
// verify and name the same user, so a party holding one key cannot forge it.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::{SignError, VerifyError};
use crate::token::signer::sign_token;
use crate::token::verifier::verify_token;
use crate::token::{
    Tag, APPLICATION_TTL_SECS, COOKIE_SEPARATOR, FIELD_DELIMITER, TRANSACTION_TTL_SECS,
};

/// Sign a request for `username` using the current time.
pub fn sign_request(credentials: &Credentials, username: &str) -> Result<String, SignError> {
    sign_request_at(credentials, username, Utc::now())
}

/// Sign a request for `username` as of `now`.
///
/// Validation runs before any signing: username first, then the keys.
pub fn sign_request_at(
    credentials: &Credentials,
    username: &str,
    now: DateTime<Utc>,
) -> Result<String, SignError> {
    if username.is_empty() || username.contains(FIELD_DELIMITER) {
        return Err(SignError::User);
    }
    credentials.validate()?;

    let ikey = &credentials.integration_key;
    let duo_cookie = sign_token(
        &credentials.secret_key,
        username,
        ikey,
        Tag::Transaction,
        TRANSACTION_TTL_SECS,
        now,
    )
    .map_err(|_| SignError::Unknown)?;
    let app_cookie = sign_token(
        &credentials.application_key,
        username,
        ikey,
        Tag::Application,
        APPLICATION_TTL_SECS,
        now,
    )
    .map_err(|_| SignError::Unknown)?;

    Ok(format!("{duo_cookie}{COOKIE_SEPARATOR}{app_cookie}"))
}

/// Verify a signed response using the current time.
///
/// Returns the authenticated username, or `None` for any failure. The reason
/// is deliberately not exposed.
pub fn verify_response(credentials: &Credentials, response: &str) -> Option<String> {
    verify_response_at(credentials, response, Utc::now())
}

/// Verify a signed response as of `now`.
pub fn verify_response_at(
    credentials: &Credentials,
    response: &str,
    now: DateTime<Utc>,
) -> Option<String> {
    match check_response(credentials, response, now) {
        Ok(username) => Some(username),
        Err(reason) => {
            debug!(%reason, "signed response rejected");
            None
        }
    }
}

/// Same as `verify_response_at` but keeps the rejection reason.
pub fn check_response(
    credentials: &Credentials,
    response: &str,
    now: DateTime<Utc>,
) -> Result<String, VerifyError> {
    let (auth_cookie, app_cookie) = response
        .split_once(COOKIE_SEPARATOR)
        .ok_or(VerifyError::MalformedResponse)?;
    if app_cookie.contains(COOKIE_SEPARATOR) {
        return Err(VerifyError::MalformedResponse);
    }

    let ikey = &credentials.integration_key;
    let auth_user = verify_token(
        &credentials.secret_key,
        auth_cookie,
        Tag::AuthResponse,
        ikey,
        now,
    )?;
    let app_user = verify_token(
        &credentials.application_key,
        app_cookie,
        Tag::Application,
        ikey,
        now,
    )?;

    if auth_user != app_user {
        return Err(VerifyError::UserMismatch);
    }
    Ok(auth_user)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IKEY: &str = "DIXXXXXXXXXXXXXXXXXX";
    const SKEY: &str = "deadbeefdeadbeefdeadbeefdeadbeefdeadbeef";
    const AKEY: &str = "useacustomerprovidedapplicationsecretkey";

    fn creds() -> Credentials {
        Credentials::new(IKEY, SKEY, AKEY)
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn auth_cookie(user: &str, now: DateTime<Utc>) -> String {
        sign_token(SKEY, user, IKEY, Tag::AuthResponse, 300, now)
            .unwrap()
            .to_string()
    }

    fn app_cookie(user: &str, now: DateTime<Utc>) -> String {
        sign_token(AKEY, user, IKEY, Tag::Application, 3600, now)
            .unwrap()
            .to_string()
    }

    #[test]
    fn username_checked_before_keys() {
        let bad = Credentials::new("short", "short", "short");
        assert_eq!(sign_request_at(&bad, "", at(0)), Err(SignError::User));
        assert_eq!(sign_request_at(&bad, "a|b", at(0)), Err(SignError::User));
        assert_eq!(
            sign_request_at(&bad, "alice", at(0)),
            Err(SignError::IntegrationKey)
        );
    }

    #[test]
    fn mismatched_users_rejected() {
        let now = at(1_000);
        let response = format!("{}:{}", auth_cookie("alice", now), app_cookie("mallory", now));
        assert_eq!(
            check_response(&creds(), &response, now),
            Err(VerifyError::UserMismatch)
        );
    }

    #[test]
    fn colon_count_must_be_one() {
        let now = at(1_000);
        let good = format!("{}:{}", auth_cookie("alice", now), app_cookie("alice", now));
        assert_eq!(check_response(&creds(), &good, now), Ok("alice".to_string()));

        let missing = auth_cookie("alice", now);
        assert_eq!(
            check_response(&creds(), &missing, now),
            Err(VerifyError::MalformedResponse)
        );
        let extra = format!("{good}:{}", app_cookie("alice", now));
        assert_eq!(
            check_response(&creds(), &extra, now),
            Err(VerifyError::MalformedResponse)
        );
    }

    #[test]
    fn transaction_cookie_is_not_a_response() {
        let now = at(1_000);
        let request = sign_request_at(&creds(), "alice", now).unwrap();
        assert_eq!(
            check_response(&creds(), &request, now),
            Err(VerifyError::WrongTag)
        );
    }
}
