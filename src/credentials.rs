// The three long-lived keys a relying party holds for one Duo integration.

use std::fmt;

use rand::RngCore;

use crate::error::SignError;

/// Exact length of a Duo integration key.
pub const IKEY_LEN: usize = 20;

/// Exact length of a Duo secret key.
pub const SKEY_LEN: usize = 40;

/// Minimum length of the application secret key.
pub const AKEY_MIN_LEN: usize = 40;

/// Integration key, Duo secret key, and application secret key.
///
/// Built once at startup and passed by reference into every sign/verify
/// call. Nothing in the crate mutates or caches it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub integration_key: String,
    pub secret_key: String,
    pub application_key: String,
}

impl Credentials {
    pub fn new(
        integration_key: impl Into<String>,
        secret_key: impl Into<String>,
        application_key: impl Into<String>,
    ) -> Self {
        Self {
            integration_key: integration_key.into(),
            secret_key: secret_key.into(),
            application_key: application_key.into(),
        }
    }

    /// Check key lengths in the order the legacy API reports them.
    ///
    /// Lengths are counted in characters, not bytes.
    pub fn validate(&self) -> Result<(), SignError> {
        if self.integration_key.chars().count() != IKEY_LEN {
            return Err(SignError::IntegrationKey);
        }
        if self.secret_key.chars().count() != SKEY_LEN {
            return Err(SignError::SecretKey);
        }
        if self.application_key.chars().count() < AKEY_MIN_LEN {
            return Err(SignError::ApplicationKey);
        }
        Ok(())
    }
}

/// Generate a random application secret key of `length` hex characters.
///
/// Lengths below `AKEY_MIN_LEN` are raised to the minimum.
pub fn generate_application_key(length: usize) -> String {
    let length = length.max(AKEY_MIN_LEN);
    let mut bytes = vec![0u8; length.div_ceil(2)];
    rand::rng().fill_bytes(&mut bytes);
    let mut key = hex::encode(bytes);
    key.truncate(length);
    key
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("integration_key", &self.integration_key)
            .field("secret_key", &"<redacted>")
            .field("application_key", &"<redacted>")
            .finish()
    }
}
