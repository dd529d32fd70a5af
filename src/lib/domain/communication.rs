//! Communication module: email addresses, message composition and delivery.

pub mod email_addresses;
pub mod mail;
pub mod mailer;
pub mod test_mail;
