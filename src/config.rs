use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::credentials::{Credentials, AKEY_MIN_LEN, IKEY_LEN, SKEY_LEN};

/// Default port for the demo server.
pub const DEFAULT_PORT: u16 = 8080;

/// Default directory for Duo-Web-v2.js and Duo-Frame.css.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy. The config is read once
/// and shared read-only afterwards.
#[cfg_attr(test, derive(Debug))]
pub struct Config {
    /// Duo integration key (DUO_IKEY)
    pub integration_key: String,
    /// Duo secret key (DUO_SKEY)
    pub secret_key: String,
    /// Application secret key (DUO_AKEY), generated by the relying party.
    /// `duo-web generate-akey` prints a suitable value.
    pub application_key: String,
    /// Duo API hostname embedded in the prompt page (DUO_HOST)
    pub api_host: String,
    /// Port for the demo server (DUO_PORT)
    pub port: u16,
    /// Bind address for the demo server (DUO_BIND)
    pub bind: String,
    /// Directory holding Duo-Web-v2.js and Duo-Frame.css (DUO_STATIC_DIR)
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables, after loading a
    /// .env file from the working directory if one exists.
    ///
    /// Missing keys load as empty strings so that `sign`/`verify` can report
    /// the exact legacy error; call `require_credentials` before serving.
    pub fn load() -> Result<Self> {
        // Silently ignore a missing .env file
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    /// Like `load`, but reads the given env file, which must exist.
    /// Variables already set in the process environment win.
    pub fn load_from(env_file: &Path) -> Result<Self> {
        dotenvy::from_path(env_file)
            .with_context(|| format!("Failed to read env file {}", env_file.display()))?;
        Self::from_env()
    }

    fn from_env() -> Result<Self> {
        let port = match env::var("DUO_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("DUO_PORT must be a port number, got {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            integration_key: env::var("DUO_IKEY").unwrap_or_default(),
            secret_key: env::var("DUO_SKEY").unwrap_or_default(),
            application_key: env::var("DUO_AKEY").unwrap_or_default(),
            api_host: env::var("DUO_HOST").unwrap_or_default(),
            port,
            bind: env::var("DUO_BIND").unwrap_or_else(|_| "127.0.0.1".to_string()),
            static_dir: env::var("DUO_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }

    /// The key triple passed into every sign/verify call.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            &self.integration_key,
            &self.secret_key,
            &self.application_key,
        )
    }

    /// Check that all three keys are present and correctly sized.
    /// Call this before starting the server so misconfiguration fails loudly
    /// instead of rendering an ERR| string into every page.
    pub fn require_credentials(&self) -> Result<()> {
        let checks = [
            ("DUO_IKEY", &self.integration_key, IKEY_LEN, true),
            ("DUO_SKEY", &self.secret_key, SKEY_LEN, true),
            ("DUO_AKEY", &self.application_key, AKEY_MIN_LEN, false),
        ];
        for (name, value, len, exact) in checks {
            if value.is_empty() {
                anyhow::bail!(
                    "{name} not set. Add it to your .env file.\n\
                     See .env.example for the required variables."
                );
            }
            let actual = value.chars().count();
            if exact && actual != len {
                anyhow::bail!("{name} must be exactly {len} characters (got {actual})");
            }
            if !exact && actual < len {
                anyhow::bail!(
                    "{name} must be at least {len} characters (got {actual}).\n\
                     Run `duo-web generate-akey` to create one."
                );
            }
        }
        Ok(())
    }

    /// Check that the Duo API hostname is configured.
    pub fn require_host(&self) -> Result<()> {
        if self.api_host.is_empty() {
            anyhow::bail!(
                "DUO_HOST not set. Add your Duo API hostname to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}
