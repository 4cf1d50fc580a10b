//! Mailer that only logs.

use super::mailer::{MailError, Mailer, OutgoingMail};
use async_trait::async_trait;
use tracing::{debug, info};

/// Writes outgoing mail to the log instead of delivering it.
///
/// Used for local development when no SMTP relay is configured. The reset
/// link is logged in full, so never run it where logs are shared.
pub struct LogMailer;

impl LogMailer {
    /// Creates a new LogMailer instance.
    pub fn new() -> Self {
        debug!("Using LogMailer (SMTP disabled)");
        Self
    }
}

impl Default for LogMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        info!(
            to = %mail.recipient,
            subject = %mail.subject,
            template = mail.template.name(),
            reset_url = %mail.reset_url,
            "Email not sent (SMTP disabled)"
        );
        Ok(())
    }
}
