// Error types for the two halves of the handshake.
//
// Sign-side errors are caller mistakes and render to the fixed `ERR|...`
// strings that existing integrations compare against. Verify-side errors
// are detailed for tests and debug logs only; the public verification
// entry points collapse every one of them into `None`.

use std::fmt;

use thiserror::Error;

/// Why a signed request could not be produced.
///
/// `Display` yields the exact legacy text, so `err.to_string()` can be
/// handed straight to the client-side script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignError {
    User,
    IntegrationKey,
    SecretKey,
    ApplicationKey,
    /// Anything that went wrong after input validation passed.
    Unknown,
}

impl SignError {
    /// The legacy sentinel string for this error.
    pub fn as_legacy_str(&self) -> &'static str {
        match self {
            SignError::User => "ERR|The username passed to sign_request() is invalid.",
            SignError::IntegrationKey => {
                "ERR|The Duo integration key passed to sign_request() is invalid."
            }
            SignError::SecretKey => "ERR|The Duo secret key passed to sign_request() is invalid.",
            SignError::ApplicationKey => {
                "ERR|The application secret key passed to sign_request() must be at least 40 characters."
            }
            SignError::Unknown => "ERR|An unknown error has occurred.",
        }
    }
}

impl fmt::Display for SignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_legacy_str())
    }
}

impl std::error::Error for SignError {}

/// Why a signed token or response was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("token does not have exactly three fields or its payload is not base64")]
    MalformedToken,
    #[error("signature does not match")]
    BadSignature,
    #[error("token tag does not match the expected tag")]
    WrongTag,
    #[error("payload is not a valid username|ikey|expiry triple")]
    MalformedPayload,
    #[error("payload integration key does not match")]
    IntegrationMismatch,
    #[error("token has expired")]
    Expired,
    #[error("response does not have exactly two colon-separated tokens")]
    MalformedResponse,
    #[error("usernames in the two tokens differ")]
    UserMismatch,
}
