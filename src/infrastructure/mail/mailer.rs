//! Mailer trait, message type and error types.

use async_trait::async_trait;
use lettre::transport::smtp::Error as SmtpError;
use thiserror::Error;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl MailError {
    /// True for failures a later attempt may get past: SMTP errors the server
    /// did not report as permanent. Bad addresses and templates never are.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Smtp(e) => !e.is_permanent(),
            Self::MessageBuild(_) | Self::InvalidAddress(_) | Self::Template(_) => false,
        }
    }
}

/// Which template renders the message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailTemplate {
    PasswordReset,
}

impl MailTemplate {
    /// Template file stem under `templates/email/`.
    pub fn name(self) -> &'static str {
        match self {
            Self::PasswordReset => "password-reset",
        }
    }
}

/// A message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub recipient: String,
    pub recipient_name: String,
    pub subject: String,
    pub reset_url: String,
    pub template: MailTemplate,
}

/// Delivers transactional email.
///
/// Delivery failures are returned to the caller, never swallowed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_and_template_errors_are_not_transient() {
        assert!(!MailError::InvalidAddress("wes@".to_string()).is_transient());
        assert!(!MailError::Template(askama::Error::Fmt).is_transient());
    }
}
