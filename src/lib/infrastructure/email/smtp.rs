//! SMTP mailer implementation

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use lettre::{
    message::{
        header::{ContentType, HeaderName, HeaderValue},
        Mailbox, MultiPart, SinglePart,
    },
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

use crate::domain::communication::mailer::{
    Address, EmailMessage, Mailer, MailerError, MimePart,
};

/// SMTP configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[arg(long = "smtp-host", env = "SMTP_HOST")]
    pub host: String,

    /// The SMTP port
    #[arg(long = "smtp-port", env = "SMTP_PORT", default_value = "587")]
    pub port: u16,

    /// The SMTP username
    #[arg(long = "smtp-user", env = "SMTP_USER")]
    pub username: Option<String>,

    /// The SMTP password
    #[arg(long = "smtp-password", env = "SMTP_PASSWORD")]
    pub password: Option<String>,

    /// Verify the TLS certificate
    #[arg(long = "smtp-verify-tls", env = "SMTP_VERIFY_TLS", default_value_t = true, action = clap::ArgAction::Set)]
    pub verify_tls: bool,

    /// Enable STARTTLS (TLS upgrade on connection) instead of implicit TLS
    #[arg(long = "smtp-starttls", env = "SMTP_STARTTLS", default_value_t = true, action = clap::ArgAction::Set)]
    pub starttls: bool,

    /// Seconds to wait for the SMTP server before giving up
    #[arg(
        long = "smtp-timeout",
        env = "SMTP_TIMEOUT",
        default_value = "30",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,
}

/// SMTP mailer
#[derive(Debug, Default, Clone)]
pub struct SMTPMailer {
    config: SMTPConfig,
}

impl SMTPMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SMTPConfig) -> Self {
        Self { config }
    }

    /// Create the SMTP transport described by the configuration
    pub fn mailer(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let tls_parameters = TlsParameters::builder(self.config.host.to_string())
            .dangerous_accept_invalid_certs(!self.config.verify_tls)
            .build()?;

        let relay = if self.config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
                .tls(Tls::Required(tls_parameters))
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)?
                .tls(Tls::Wrapper(tls_parameters))
        };

        let mut relay = relay
            .port(self.config.port)
            .timeout(Some(Duration::from_secs(self.config.timeout)));

        if let (Some(username), Some(password)) = (&self.config.username, &self.config.password) {
            relay = relay.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(relay.build())
    }
}

#[async_trait]
impl Mailer for SMTPMailer {
    async fn send_message(&self, message: EmailMessage) -> Result<(), MailerError> {
        let email = build_message(&message)?;

        debug!(
            host = %self.config.host,
            port = self.config.port,
            subject = message.subject(),
            "sending message over SMTP"
        );

        self.mailer()?
            .send(email)
            .await
            .map_err(|e| MailerError::SendError(e.to_string()))?;

        Ok(())
    }
}

/// Converts an assembled message into a lettre [`Message`]
fn build_message(message: &EmailMessage) -> Result<Message, MailerError> {
    let mut builder = Message::builder().subject(message.subject());

    for address in message.from() {
        builder = builder.from(mailbox(address)?);
    }

    // More than one author requires an explicit Sender (RFC 5322 3.6.2).
    if let [first, _, ..] = message.from() {
        builder = builder.sender(mailbox(first)?);
    }

    for address in message.to() {
        builder = builder.to(mailbox(address)?);
    }

    for address in message.cc() {
        builder = builder.cc(mailbox(address)?);
    }

    for address in message.bcc() {
        builder = builder.bcc(mailbox(address)?);
    }

    for header in message.headers() {
        let name = HeaderName::new_from_ascii(header.name().to_string())
            .map_err(|_| MailerError::InvalidHeader(header.name().to_string()))?;

        builder = builder.raw_header(HeaderValue::new(name, header.value().to_string()));
    }

    let email = match message.body().parts() {
        [] => return Err(MailerError::InvalidMessage("message has no body".to_string())),
        [part] => builder.singlepart(single_part(part)?),
        [first, rest @ ..] => {
            let mut multipart = MultiPart::mixed().singlepart(single_part(first)?);

            for part in rest {
                multipart = multipart.singlepart(single_part(part)?);
            }

            builder.multipart(multipart)
        }
    };

    email.map_err(|e| MailerError::InvalidMessage(e.to_string()))
}

fn mailbox(address: &Address) -> Result<Mailbox, MailerError> {
    let email = address
        .email()
        .as_str()
        .parse()
        .map_err(|_| MailerError::InvalidAddress(address.email().to_string()))?;

    Ok(Mailbox::new(address.name().map(str::to_string), email))
}

fn single_part(part: &MimePart) -> Result<SinglePart, MailerError> {
    let content_type = ContentType::parse(&format!(
        "{}; charset={}",
        part.content_type(),
        part.charset()
    ))
    .map_err(|e| MailerError::Encoding(e.to_string()))?;

    Ok(SinglePart::builder()
        .header(content_type)
        .body(part.content().to_string()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::communication::{
        email_addresses::EmailAddress,
        mailer::{MessageData, MimeMessage, DEFAULT_CHARSET},
    };

    use super::*;

    fn address(email: &str, name: Option<&str>) -> TestResult<Address> {
        Ok(Address::new(
            EmailAddress::new(email)?,
            name.map(str::to_string),
        ))
    }

    fn message(from: Vec<Address>, parts: Vec<MimePart>) -> TestResult<EmailMessage> {
        Ok(EmailMessage::new(MessageData {
            from,
            to: vec![address("user@example.com", None)?],
            cc: vec![address("copy@example.com", Some("Copy"))?],
            bcc: vec![address("hidden@example.com", None)?],
            encoding: DEFAULT_CHARSET.to_string(),
            subject: "Test Mail".to_string(),
            body: MimeMessage::new(parts),
        }))
    }

    fn formatted(email: &Message) -> String {
        String::from_utf8_lossy(&email.formatted()).to_string()
    }

    #[test]
    fn test_smtp_timeout_must_be_positive() {
        let args = ["smtp", "--smtp-host", "localhost", "--smtp-timeout", "0"];

        assert!(SMTPConfig::try_parse_from(args).is_err());
    }

    #[test]
    fn test_smtp_config_defaults() -> TestResult {
        let config = SMTPConfig::try_parse_from(["smtp", "--smtp-host", "localhost"])?;

        assert_eq!(config.port, 587);
        assert_eq!(config.timeout, 30);
        assert!(config.starttls);
        assert!(config.verify_tls);

        Ok(())
    }

    #[test]
    fn test_build_message() -> TestResult {
        let mut message = message(
            vec![address("shop@example.com", Some("Shop"))?],
            vec![MimePart::new("This is a test message.", "text/plain")],
        )?;
        message.add_header_line("X-Test", Some("1"))?;

        let email = build_message(&message)?;
        let raw = formatted(&email);

        assert!(raw.contains("From: Shop <shop@example.com>"));
        assert!(raw.contains("To: user@example.com"));
        assert!(raw.contains("Cc: Copy <copy@example.com>"));
        assert!(!raw.contains("hidden@example.com"));
        assert!(raw.contains("Subject: Test Mail"));
        assert!(raw.contains("X-Test: 1"));
        assert!(raw.contains("Content-Type: text/plain; charset=utf-8"));
        assert!(raw.contains("This is a test message."));

        let recipients = email.envelope().to();
        assert_eq!(recipients.len(), 3);

        Ok(())
    }

    #[test]
    fn test_build_message_with_several_senders_sets_sender() -> TestResult {
        let message = message(
            vec![
                address("shop@example.com", Some("Shop"))?,
                address("sales@example.com", None)?,
            ],
            vec![MimePart::new("Hello", "text/plain")],
        )?;

        let raw = formatted(&build_message(&message)?);

        assert!(raw.contains("Sender: Shop <shop@example.com>"));

        Ok(())
    }

    #[test]
    fn test_build_message_without_sender_is_invalid() -> TestResult {
        let message = message(vec![], vec![MimePart::new("Hello", "text/plain")])?;

        let result = build_message(&message);

        assert!(matches!(result, Err(MailerError::InvalidMessage(_))));

        Ok(())
    }

    #[test]
    fn test_build_message_with_invalid_content_type() -> TestResult {
        let message = message(
            vec![address("shop@example.com", None)?],
            vec![MimePart::new("Hello", "not a mime type")],
        )?;

        let result = build_message(&message);

        assert!(matches!(result, Err(MailerError::Encoding(_))));

        Ok(())
    }

    #[test]
    fn test_build_message_with_several_parts() -> TestResult {
        let message = message(
            vec![address("shop@example.com", None)?],
            vec![
                MimePart::new("Hello", "text/plain"),
                MimePart::new("<p>Hello</p>", "text/html"),
            ],
        )?;

        let raw = formatted(&build_message(&message)?);

        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("Content-Type: text/html; charset=utf-8"));

        Ok(())
    }
}
