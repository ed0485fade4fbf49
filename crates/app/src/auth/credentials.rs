//! Configured administrator credential pair.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::auth::{AdminAuthError, AdminPrincipal};

/// The administrator username and the SHA-256 digest of their password.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password_digest: Option<String>,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password_digest", &"**redacted**")
            .finish()
    }
}

impl AdminCredentials {
    /// Hash a plaintext password once at startup. An empty password leaves
    /// the dashboard locked.
    #[must_use]
    pub fn from_plaintext(username: impl Into<String>, password: &str) -> Self {
        Self {
            username: username.into(),
            password_digest: (!password.is_empty()).then(|| digest(password)),
        }
    }

    /// Use a precomputed lowercase hex SHA-256 digest.
    #[must_use]
    pub fn from_digest(username: impl Into<String>, password_digest: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_digest: Some(password_digest.into().to_ascii_lowercase()),
        }
    }

    /// Check a submitted username and password.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminPrincipal, AdminAuthError> {
        let Some(expected) = self.password_digest.as_deref() else {
            return Err(AdminAuthError::NotConfigured);
        };

        let username_matches = constant_time_eq(username.as_bytes(), self.username.as_bytes());
        let password_matches = constant_time_eq(digest(password).as_bytes(), expected.as_bytes());

        if !(username_matches & password_matches) {
            return Err(AdminAuthError::InvalidCredentials);
        }

        Ok(AdminPrincipal::new(&self.username))
    }

    /// Rebuild the principal for a username stored in a session at login.
    #[must_use]
    pub fn restore(&self, username: &str) -> Option<AdminPrincipal> {
        (self.password_digest.is_some() && username == self.username)
            .then(|| AdminPrincipal::new(&self.username))
    }
}

fn digest(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Byte equality that inspects every byte once the lengths agree.
fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    let difference = left
        .iter()
        .zip(right)
        .fold(0_u8, |acc, (l, r)| acc | (l ^ r));

    std::hint::black_box(difference) == 0
}
