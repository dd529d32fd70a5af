//! Email message

use crate::domain::communication::email_addresses::EmailAddress;

use super::errors::MailerError;

/// The charset assigned to a MIME part unless another one is negotiated
pub const DEFAULT_CHARSET: &str = "utf-8";

/// A validated address ready for transmission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    email: EmailAddress,
    name: Option<String>,
}

impl Address {
    /// Creates a new address record
    pub fn new(email: EmailAddress, name: Option<String>) -> Self {
        Self { email, name }
    }

    /// The email address
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The display name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A single content block of a message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MimePart {
    content: String,
    content_type: String,
    charset: String,
}

impl MimePart {
    /// Creates a part using [`DEFAULT_CHARSET`]
    pub fn new(content: &str, content_type: &str) -> Self {
        Self {
            content: content.to_string(),
            content_type: content_type.to_string(),
            charset: DEFAULT_CHARSET.to_string(),
        }
    }

    /// Replaces the charset of the part
    pub fn with_charset(mut self, charset: &str) -> Self {
        self.charset = charset.to_string();
        self
    }

    /// The raw content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The MIME type, e.g. `text/plain`
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The character encoding of the content
    pub fn charset(&self) -> &str {
        &self.charset
    }
}

/// A message body made of one or more parts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MimeMessage {
    parts: Vec<MimePart>,
}

impl MimeMessage {
    /// Creates a message body from its parts
    pub fn new(parts: Vec<MimePart>) -> Self {
        Self { parts }
    }

    /// The parts of the body
    pub fn parts(&self) -> &[MimePart] {
        &self.parts
    }
}

/// Everything needed to construct an [`EmailMessage`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageData {
    /// Senders
    pub from: Vec<Address>,

    /// Receivers
    pub to: Vec<Address>,

    /// Copy receivers
    pub cc: Vec<Address>,

    /// Blind copy receivers
    pub bcc: Vec<Address>,

    /// Character encoding of the body
    pub encoding: String,

    /// The subject as it will be transmitted
    pub subject: String,

    /// The message body
    pub body: MimeMessage,
}

/// A header field appended to a message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    /// The field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field value
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A fully assembled message, handed to a transport for delivery
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    from: Vec<Address>,
    to: Vec<Address>,
    cc: Vec<Address>,
    bcc: Vec<Address>,
    encoding: String,
    subject: String,
    body: MimeMessage,
    headers: Vec<Header>,
}

impl EmailMessage {
    /// Creates a message without additional headers
    pub fn new(data: MessageData) -> Self {
        Self {
            from: data.from,
            to: data.to,
            cc: data.cc,
            bcc: data.bcc,
            encoding: data.encoding,
            subject: data.subject,
            body: data.body,
            headers: Vec::new(),
        }
    }

    /// Appends a header.
    ///
    /// With `value` set, `name_or_line` is the field name. Without it,
    /// `name_or_line` must be a complete `Name: value` line.
    pub fn add_header_line(
        &mut self,
        name_or_line: &str,
        value: Option<&str>,
    ) -> Result<(), MailerError> {
        let (name, value) = match value {
            Some(value) => (name_or_line.trim(), value.trim()),
            None => {
                let (name, value) = name_or_line
                    .split_once(':')
                    .ok_or_else(|| MailerError::InvalidHeader(name_or_line.to_string()))?;

                (name.trim(), value.trim())
            }
        };

        if !is_valid_field_name(name) || value.contains(&['\r', '\n'][..]) {
            return Err(MailerError::InvalidHeader(name_or_line.to_string()));
        }

        self.headers.push(Header {
            name: name.to_string(),
            value: value.to_string(),
        });

        Ok(())
    }

    /// Senders
    pub fn from(&self) -> &[Address] {
        &self.from
    }

    /// Receivers
    pub fn to(&self) -> &[Address] {
        &self.to
    }

    /// Copy receivers
    pub fn cc(&self) -> &[Address] {
        &self.cc
    }

    /// Blind copy receivers
    pub fn bcc(&self) -> &[Address] {
        &self.bcc
    }

    /// Character encoding of the body
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// The subject
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The body
    pub fn body(&self) -> &MimeMessage {
        &self.body
    }

    /// Headers appended after construction, in insertion order
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }
}

// RFC 5322 field names: printable US-ASCII except colon.
fn is_valid_field_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| (33..=126).contains(&b) && b != b':')
}
