//! Test mail errors

use thiserror::Error;

use crate::domain::communication::mailer::MailerError;

/// Errors that can occur when sending a test mail
#[derive(Debug, Error)]
pub enum TestMailError {
    /// No sender is configured for the identity
    #[error("Unknown sender identity \"{0}\"")]
    UnknownSenderIdentity(String),

    /// Composing or delivering the mail failed
    #[error(transparent)]
    Mail(#[from] MailerError),
}
