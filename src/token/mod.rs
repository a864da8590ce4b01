// Signed cookies: the building blocks of both the outbound request and the
// inbound response.
//
// Cookie format:  {tag}|{base64(payload)}|{hmac_sha1_hex}
// Payload format: {username}|{integration_key}|{expires_at_unix_secs}
//
// The HMAC covers "{tag}|{base64(payload)}". A request or response is two
// cookies joined by ':'.

use std::fmt;

pub mod signer;
pub mod verifier;

/// Separator between the fields of a cookie and of its payload.
pub const FIELD_DELIMITER: char = '|';

/// Separator between the two cookies of a request or response.
pub const COOKIE_SEPARATOR: char = ':';

/// Lifetime of the transaction cookie sent to the authentication service.
pub const TRANSACTION_TTL_SECS: i64 = 300;

/// Lifetime of the application cookie echoed back in the response.
pub const APPLICATION_TTL_SECS: i64 = 3600;

/// Role of a cookie. Verification insists on the expected tag so a cookie
/// minted for one purpose cannot stand in for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `TX`: outbound, signed with the Duo secret key.
    Transaction,
    /// `APP`: outbound and inbound, signed with the application secret key.
    Application,
    /// `AUTH`: inbound, signed by the service with the Duo secret key.
    AuthResponse,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Transaction => "TX",
            Tag::Application => "APP",
            Tag::AuthResponse => "AUTH",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The plaintext carried inside a cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub username: String,
    pub integration_key: String,
    pub expires_at: i64,
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{}",
            self.username, self.integration_key, self.expires_at
        )
    }
}

/// A fully signed cookie. `to_string()` gives the wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    pub tag: Tag,
    pub payload_b64: String,
    pub signature_hex: String,
}

impl SignedToken {
    /// The portion of the cookie covered by the signature.
    pub fn signed_part(&self) -> String {
        signed_part(self.tag.as_str(), &self.payload_b64)
    }
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{}",
            self.tag, self.payload_b64, self.signature_hex
        )
    }
}

pub(crate) fn signed_part(tag: &str, payload_b64: &str) -> String {
    format!("{tag}{FIELD_DELIMITER}{payload_b64}")
}
