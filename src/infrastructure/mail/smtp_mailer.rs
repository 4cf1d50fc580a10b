//! SMTP mailer using lettre and Askama templates.

use askama::Template;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use secrecy::ExposeSecret;

use super::mailer::{MailError, MailTemplate, Mailer, OutgoingMail};
use crate::config::SmtpConfig;

/// HTML template for the password reset email.
#[derive(Template)]
#[template(path = "email/password-reset.html")]
struct PasswordResetHtml<'a> {
    name: &'a str,
    reset_url: &'a str,
}

/// Plain text template for the password reset email.
#[derive(Template)]
#[template(path = "email/password-reset.txt")]
struct PasswordResetText<'a> {
    name: &'a str,
    reset_url: &'a str,
}

/// Renders `(text, html)` bodies for a message.
fn render(mail: &OutgoingMail) -> Result<(String, String), MailError> {
    match mail.template {
        MailTemplate::PasswordReset => {
            let name = mail.recipient_name.as_str();
            let reset_url = mail.reset_url.as_str();
            let text = PasswordResetText { name, reset_url }.render()?;
            let html = PasswordResetHtml { name, reset_url }.render()?;
            Ok((text, html))
        }
    }
}

/// Email service delivering over an SMTP relay with STARTTLS.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    /// Creates a mailer from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Smtp`] if the relay address is invalid.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let (text_body, html_body) = render(&mail)?;

        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| MailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(mail
                .recipient
                .parse()
                .map_err(|_| MailError::InvalidAddress(mail.recipient.clone()))?)
            .subject(mail.subject.as_str())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %mail.recipient, subject = %mail.subject, "Email sent successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_password_reset_includes_link() {
        let mail = OutgoingMail {
            recipient: "wes@example.com".to_string(),
            recipient_name: "Wes".to_string(),
            subject: "Password reset".to_string(),
            reset_url: "http://localhost:3000/account/reset/abc123".to_string(),
            template: MailTemplate::PasswordReset,
        };

        let (text, html) = render(&mail).unwrap();

        assert!(text.contains("http://localhost:3000/account/reset/abc123"));
        assert!(html.contains("http://localhost:3000/account/reset/abc123"));
        assert!(text.contains("Wes"));
    }
}
