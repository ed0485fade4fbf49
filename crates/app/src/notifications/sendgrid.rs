//! SendGrid v3 mail client.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

use crate::notifications::{DeliveryReceipt, EmailMessage, NotificationError, Notifier};

/// Default SendGrid mail endpoint.
pub const DEFAULT_SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Default per-message timeout.
pub const DEFAULT_MAIL_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the SendGrid client.
#[derive(Clone)]
pub struct SendGridConfig {
    /// API key. Without one every send fails with
    /// [`NotificationError::NotConfigured`].
    pub api_key: Option<String>,

    /// Full URL of the `mail/send` endpoint.
    pub api_url: String,

    /// Sender address.
    pub from_email: String,

    /// Upper bound on a single request.
    pub timeout: Duration,
}

impl fmt::Debug for SendGridConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendGridConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "**redacted**"))
            .field("api_url", &self.api_url)
            .field("from_email", &self.from_email)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTP client for the SendGrid v3 mail API.
#[derive(Debug, Clone)]
pub struct SendGridNotifier {
    config: SendGridConfig,
    http: Client,
}

impl SendGridNotifier {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: SendGridConfig) -> Result<Self, NotificationError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }
}

#[async_trait]
impl Notifier for SendGridNotifier {
    #[tracing::instrument(
        name = "notifications.sendgrid.send",
        skip(self, message),
        fields(subject = %message.subject),
        err
    )]
    async fn send(&self, message: EmailMessage) -> Result<DeliveryReceipt, NotificationError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(NotificationError::NotConfigured);
        };

        let body = MailSend::new(&self.config.from_email, &message);

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            warn!(status = status.as_u16(), "mail provider rejected message");

            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        info!(status = status.as_u16(), "mail accepted");

        Ok(DeliveryReceipt {
            status: status.as_u16(),
        })
    }
}

#[derive(Debug, Serialize)]
struct MailSend<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

impl<'a> MailSend<'a> {
    fn new(from_email: &'a str, message: &'a EmailMessage) -> Self {
        Self {
            personalizations: [Personalization {
                to: [Address { email: &message.to }],
            }],
            from: Address { email: from_email },
            subject: &message.subject,
            content: [Content {
                kind: "text/html",
                value: &message.html,
            }],
        }
    }
}
