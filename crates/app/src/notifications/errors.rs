//! Notification errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    /// No mail API key was configured.
    #[error("mail delivery is not configured")]
    NotConfigured,

    /// The provider answered with a non-2xx status.
    #[error("mail provider returned {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The send did not finish within the mail timeout.
    #[error("mail delivery timed out")]
    TimedOut,

    /// Transport or client construction failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
