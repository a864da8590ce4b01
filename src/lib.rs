// duo-web: signed request/response tokens for the Duo Web iframe handshake.
//
// This is the library root. The handshake module holds the two entry points
// (sign_request, verify_response); token and crypto hold the cookie format
// and primitives beneath them. The web feature adds a demo relying-party
// server around them.

pub mod config;
pub mod credentials;
pub mod crypto;
pub mod error;
pub mod handshake;
pub mod token;

#[cfg(feature = "web")]
pub mod web;

pub use credentials::Credentials;
pub use error::{SignError, VerifyError};
pub use handshake::{sign_request, sign_request_at, verify_response, verify_response_at};
