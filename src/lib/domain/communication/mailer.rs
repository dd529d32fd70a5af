//! Mailer module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::email_addresses::EmailAddress;

mod errors;
mod message;

pub use errors::MailerError;
pub use message::{
    Address, EmailMessage, Header, MessageData, MimeMessage, MimePart, DEFAULT_CHARSET,
};

/// The mail stack a [`Mail`](crate::domain::communication::mail::Mail) delegates to.
///
/// Only [`Mailer::send_message`] has to be provided. The other operations have
/// defaults that validate addresses with [`EmailAddress`] and build plain
/// in-memory MIME structures.
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Converts a raw address and optional display name into an [`Address`].
    ///
    /// # Returns
    /// [`MailerError::InvalidAddress`] if `email` is not a valid address.
    fn convert_address(&self, email: &str, name: Option<&str>) -> Result<Address, MailerError> {
        let email =
            EmailAddress::new(email).map_err(|_| MailerError::InvalidAddress(email.to_string()))?;

        let name = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Ok(Address::new(email, name))
    }

    /// Builds a single body part from `content` and its MIME type.
    fn create_mime_part(&self, content: &str, content_type: &str) -> Result<MimePart, MailerError> {
        Ok(MimePart::new(content, content_type))
    }

    /// Constructs the message envelope from its construction record.
    fn create_message(&self, data: MessageData) -> Result<EmailMessage, MailerError> {
        Ok(EmailMessage::new(data))
    }

    /// Delivers a message.
    ///
    /// # Arguments
    /// * `message` - The message to deliver. The transport owns it and may consume it.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure.
    async fn send_message(&self, message: EmailMessage) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send_message(&self, message: EmailMessage) -> Result<(), MailerError>;
    }
}
