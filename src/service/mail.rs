//! Activation email delivery.
//!
//! The [`Mailer`] trait is the seam between the auth flow and the SMTP
//! transport; services never touch lettre directly, and tests substitute a
//! recording mailer.

use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Invalid mail address: {0}")]
    Address(String),
    #[error("Failed to build mail message: {0}")]
    Message(String),
    #[error("Failed to send mail: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the activation code to the given address. One attempt, no
    /// retries; the caller records the outcome on the subscriber row.
    async fn send_activation_email(
        &self,
        to: &str,
        activation_code: &str,
    ) -> Result<(), MailError>;
}

/// SMTP implementation over an implicit-TLS relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn from_config(config: &Config) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.email_host)
            .map_err(|err| MailError::Transport(err.to_string()))?
            .port(config.email_port)
            .credentials(Credentials::new(
                config.email_user.clone(),
                config.email_password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.email_from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_activation_email(
        &self,
        to: &str,
        activation_code: &str,
    ) -> Result<(), MailError> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|err: lettre::address::AddressError| {
                        MailError::Address(err.to_string())
                    })?,
            )
            .to(to
                .parse()
                .map_err(|err: lettre::address::AddressError| {
                    MailError::Address(err.to_string())
                })?)
            .subject("Account activation")
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Hello!\n\n\
                 Thank you for registering. To activate your account, enter \
                 the following code on the activation page:\n\n\
                 {activation_code}\n\n\
                 If you did not register, simply ignore this message.",
            ))
            .map_err(|err| MailError::Message(err.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|err| MailError::Transport(err.to_string()))?;

        Ok(())
    }
}
