//! Mail Config

use std::{fmt, time::Duration};

use clap::Args;
use washbay_app::notifications::{DEFAULT_SENDGRID_API_URL, SendGridConfig};

/// Outgoing mail settings.
#[derive(Args)]
pub struct MailConfig {
    /// SendGrid API key; mail is disabled without one
    #[arg(long = "sendgrid-api-key", env = "SENDGRID_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// SendGrid mail endpoint
    #[arg(
        long = "sendgrid-api-url",
        env = "SENDGRID_API_URL",
        default_value = DEFAULT_SENDGRID_API_URL
    )]
    pub api_url: String,

    /// Sender address
    #[arg(long, env = "FROM_EMAIL", default_value = "noreply@washbay.local")]
    pub from_email: String,

    /// Address that receives every new booking
    #[arg(long, env = "ADMIN_EMAIL", default_value = "")]
    pub admin_email: String,

    /// Per-message delivery timeout in seconds
    #[arg(
        long = "mail-timeout-seconds",
        env = "MAIL_TIMEOUT_SECONDS",
        default_value_t = 10_u64
    )]
    pub timeout_seconds: u64,
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "**redacted**"))
            .field("api_url", &self.api_url)
            .field("from_email", &self.from_email)
            .field("admin_email", &self.admin_email)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl MailConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    #[must_use]
    pub fn sendgrid(&self) -> SendGridConfig {
        SendGridConfig {
            api_key: self.api_key.clone().filter(|key| !key.trim().is_empty()),
            api_url: self.api_url.clone(),
            from_email: self.from_email.clone(),
            timeout: self.timeout(),
        }
    }
}
