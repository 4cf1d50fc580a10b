//! Outbound mail.
//!
//! Provides a [`Mailer`] trait with two implementations:
//! - [`SmtpMailer`] - SMTP delivery via `lettre` with Askama templates
//! - [`LogMailer`] - Writes the message to the log; used when SMTP is not configured

mod log_mailer;
mod mailer;
mod smtp_mailer;

pub use log_mailer::LogMailer;
pub use mailer::{MailError, MailTemplate, Mailer, OutgoingMail};
pub use smtp_mailer::SmtpMailer;

#[cfg(test)]
pub use mailer::MockMailer;
