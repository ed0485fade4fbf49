//! Admin Auth Config

use std::fmt;

use clap::Args;
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use tracing::warn;
use washbay_app::auth::AdminCredentials;

/// Smallest accepted session signing secret.
pub const MIN_SESSION_SECRET_BYTES: usize = 64;

#[derive(Debug, Error)]
pub enum AdminConfigError {
    #[error("SESSION_SECRET must be at least {MIN_SESSION_SECRET_BYTES} bytes, got {0}")]
    SessionSecretTooShort(usize),
}

/// Administrator login settings.
#[derive(Args)]
pub struct AdminConfig {
    /// Administrator username
    #[arg(long, env = "ADMIN_USERNAME", default_value = "admin")]
    pub username: String,

    /// Administrator password; hashed at startup
    #[arg(long = "admin-password", env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Hex SHA-256 digest of the administrator password
    #[arg(
        long = "admin-password-sha256",
        env = "ADMIN_PASSWORD_SHA256",
        hide_env_values = true,
        conflicts_with = "password"
    )]
    pub password_sha256: Option<String>,

    /// Session cookie signing secret
    #[arg(long, env = "SESSION_SECRET", hide_env_values = true)]
    pub session_secret: Option<String>,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "**redacted**"))
            .field(
                "password_sha256",
                &self.password_sha256.as_ref().map(|_| "**redacted**"),
            )
            .field(
                "session_secret",
                &self.session_secret.as_ref().map(|_| "**redacted**"),
            )
            .finish()
    }
}

impl AdminConfig {
    /// The configured credential pair. With no password the dashboard stays
    /// locked.
    #[must_use]
    pub fn credentials(&self) -> AdminCredentials {
        match (&self.password_sha256, &self.password) {
            (Some(digest), _) => AdminCredentials::from_digest(&self.username, digest.trim()),
            (None, Some(password)) => AdminCredentials::from_plaintext(&self.username, password),
            (None, None) => {
                warn!("no admin password configured, dashboard login is disabled");

                AdminCredentials::from_plaintext(&self.username, "")
            }
        }
    }

    /// The session signing secret, or a random one when none is configured.
    ///
    /// A random secret signs out every admin when the process restarts.
    pub fn session_secret(&self) -> Result<Vec<u8>, AdminConfigError> {
        let Some(secret) = self.session_secret.as_deref() else {
            warn!("no SESSION_SECRET configured, using a random per-process secret");

            let mut secret = vec![0_u8; MIN_SESSION_SECRET_BYTES];

            OsRng.fill_bytes(&mut secret);

            return Ok(secret);
        };

        if secret.len() < MIN_SESSION_SECRET_BYTES {
            return Err(AdminConfigError::SessionSecretTooShort(secret.len()));
        }

        Ok(secret.as_bytes().to_vec())
    }
}
