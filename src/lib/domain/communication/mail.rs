//! Mail composition
//!
//! A [`Mail`] collects senders, receivers, headers and content, then assembles
//! an [`EmailMessage`] and hands a copy of it to its [`Mailer`].

use std::{collections::BTreeMap, fmt, sync::Arc};

use html_escape::decode_html_entities;
use tracing::debug;

use crate::domain::communication::mailer::{
    Address, EmailMessage, Mailer, MailerError, MessageData, MimeMessage,
};

mod address_list;

pub use address_list::AddressList;

/// Content type of a new [`Mail`]
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// A single outgoing message under construction
pub struct Mail<M: Mailer> {
    mailer: Arc<M>,
    additional_headers: BTreeMap<String, Option<String>>,
    senders: AddressList,
    receivers: AddressList,
    copy_receivers: AddressList,
    blind_copy_receivers: AddressList,
    content_type: String,
    subject: Option<String>,
    body: Option<String>,
}

impl<M: Mailer> Mail<M> {
    /// Creates an empty `text/plain` mail delivered through `mailer`
    pub fn new(mailer: Arc<M>) -> Self {
        Self {
            mailer,
            additional_headers: BTreeMap::new(),
            senders: AddressList::new(),
            receivers: AddressList::new(),
            copy_receivers: AddressList::new(),
            blind_copy_receivers: AddressList::new(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            subject: None,
            body: None,
        }
    }

    /// Headers appended to the message after it is constructed
    pub fn additional_headers(&self) -> &BTreeMap<String, Option<String>> {
        &self.additional_headers
    }

    /// Replaces all additional headers
    pub fn set_additional_headers(&mut self, headers: BTreeMap<String, Option<String>>) {
        self.additional_headers = headers;
    }

    /// Adds a header. Without a value, `name` must be a full `Name: value` line.
    pub fn add_additional_header(&mut self, name: &str, value: Option<&str>) {
        self.additional_headers
            .insert(name.to_string(), value.map(str::to_string));
    }

    /// Senders
    pub fn senders(&self) -> &AddressList {
        &self.senders
    }

    /// Replaces all senders
    pub fn set_senders(&mut self, senders: AddressList) {
        self.senders = senders;
    }

    /// Adds a sender
    pub fn add_sender(&mut self, email: &str, name: Option<&str>) {
        self.senders.add(email, name);
    }

    /// Receivers
    pub fn receivers(&self) -> &AddressList {
        &self.receivers
    }

    /// Replaces all receivers
    pub fn set_receivers(&mut self, receivers: AddressList) {
        self.receivers = receivers;
    }

    /// Adds a receiver
    pub fn add_receiver(&mut self, email: &str, name: Option<&str>) {
        self.receivers.add(email, name);
    }

    /// Copy (CC) receivers
    pub fn copy_receivers(&self) -> &AddressList {
        &self.copy_receivers
    }

    /// Replaces all copy receivers
    pub fn set_copy_receivers(&mut self, receivers: AddressList) {
        self.copy_receivers = receivers;
    }

    /// Adds a copy receiver
    pub fn add_copy_receiver(&mut self, email: &str, name: Option<&str>) {
        self.copy_receivers.add(email, name);
    }

    /// Blind copy (BCC) receivers
    pub fn blind_copy_receivers(&self) -> &AddressList {
        &self.blind_copy_receivers
    }

    /// Replaces all blind copy receivers
    pub fn set_blind_copy_receivers(&mut self, receivers: AddressList) {
        self.blind_copy_receivers = receivers;
    }

    /// Adds a blind copy receiver
    pub fn add_blind_copy_receiver(&mut self, email: &str, name: Option<&str>) {
        self.blind_copy_receivers.add(email, name);
    }

    /// The MIME type of the body
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Sets the MIME type of the body
    pub fn set_type(&mut self, content_type: &str) {
        self.content_type = content_type.to_string();
    }

    /// The subject, as set (entities are not decoded)
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Sets the subject. HTML entities in it are decoded when sending.
    pub fn set_subject(&mut self, subject: &str) {
        self.subject = Some(subject.to_string());
    }

    /// The body
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Sets the body
    pub fn set_body(&mut self, body: &str) {
        self.body = Some(body.to_string());
    }

    /// Assembles the message and delivers a copy of it.
    ///
    /// Every call attempts exactly one delivery. Nothing is retried and the
    /// first error is returned unchanged.
    ///
    /// # Returns
    /// The assembled message. It is independent of the copy the mailer
    /// received, so changing it cannot affect what was sent.
    pub async fn send(&self) -> Result<EmailMessage, MailerError> {
        let subject = self.subject.as_deref().ok_or(MailerError::MissingSubject)?;
        let body = self.body.as_deref().ok_or(MailerError::MissingBody)?;

        let from = self.convert(&self.senders)?;
        let to = self.convert(&self.receivers)?;
        let cc = self.convert(&self.copy_receivers)?;
        let bcc = self.convert(&self.blind_copy_receivers)?;

        let mime_part = self.mailer.create_mime_part(body, &self.content_type)?;

        let data = MessageData {
            from,
            to,
            cc,
            bcc,
            encoding: mime_part.charset().to_string(),
            subject: decode_html_entities(subject).into_owned(),
            body: MimeMessage::new(vec![mime_part]),
        };

        let mut message = self.mailer.create_message(data)?;

        for (name, value) in &self.additional_headers {
            message.add_header_line(name, value.as_deref())?;
        }

        debug!(
            subject = message.subject(),
            to = message.to().len(),
            cc = message.cc().len(),
            bcc = message.bcc().len(),
            "sending mail"
        );

        self.mailer.send_message(message.clone()).await?;

        Ok(message)
    }

    fn convert(&self, list: &AddressList) -> Result<Vec<Address>, MailerError> {
        list.iter()
            .map(|(email, name)| self.mailer.convert_address(email, name))
            .collect()
    }
}

impl<M: Mailer> fmt::Debug for Mail<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mail")
            .field("mailer", &"Mailer")
            .field("additional_headers", &self.additional_headers)
            .field("senders", &self.senders)
            .field("receivers", &self.receivers)
            .field("copy_receivers", &self.copy_receivers)
            .field("blind_copy_receivers", &self.blind_copy_receivers)
            .field("content_type", &self.content_type)
            .field("subject", &self.subject)
            .field("body", &self.body)
            .finish()
    }
}
