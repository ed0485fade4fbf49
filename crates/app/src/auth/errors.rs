//! Admin authentication errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminAuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no administrator password configured")]
    NotConfigured,
}
