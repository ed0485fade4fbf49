//! Email notifications

mod errors;
pub mod messages;
mod sendgrid;

use async_trait::async_trait;
use mockall::automock;

pub use errors::*;
pub use sendgrid::*;

/// An outgoing HTML email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Proof that the mail provider accepted a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// HTTP status returned by the provider.
    pub status: u16,
}

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Hand a message to the mail provider.
    async fn send(&self, message: EmailMessage) -> Result<DeliveryReceipt, NotificationError>;
}
