//! Mailer errors

use thiserror::Error;

/// Mail-specific errors raised while composing or delivering a message
#[derive(Debug, Error)]
pub enum MailerError {
    /// A sender or recipient address could not be converted
    #[error("Invalid email address \"{0}\"")]
    InvalidAddress(String),

    /// A header line or header name is malformed
    #[error("Invalid header \"{0}\"")]
    InvalidHeader(String),

    /// The transport refused to build the message
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// The body could not be encoded with the requested content type
    #[error("Could not encode message: {0}")]
    Encoding(String),

    /// The subject was never set
    #[error("The message has no subject")]
    MissingSubject,

    /// The body was never set
    #[error("The message has no body")]
    MissingBody,

    /// The transport failed to deliver the message
    #[error("{0}")]
    SendError(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}
