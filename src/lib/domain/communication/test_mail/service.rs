//! Test mail service

use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

#[cfg(test)]
use mockall::mock;

use crate::domain::{
    communication::{mail::Mail, mailer::Mailer},
    configuration::StoreConfig,
};

use super::TestMailError;

lazy_static! {
    static ref IDENTITY_REGEX: Regex = Regex::new(r"^[a-z0-9_]+$").unwrap();
}

/// Content type of the test mail
pub const TEST_MAIL_TYPE: &str = "text/plain";

/// Subject of the test mail
pub const TEST_MAIL_SUBJECT: &str = "Test Mail";

/// Body of the test mail
pub const TEST_MAIL_BODY: &str = "This is a test message.";

/// Test mail service
#[async_trait]
pub trait TestMailService: Clone + Send + Sync + 'static {
    /// Sends a plain text test mail from a configured sender identity.
    ///
    /// # Arguments
    /// * `sender_identity` - The identity key, e.g. `general` or `sales`.
    /// * `receiver` - The address to send the test mail to.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] if the mail was handed to the transport,
    /// or an [`Err`] containing a [`TestMailError`] otherwise.
    async fn send_test_mail(
        &self,
        sender_identity: &str,
        receiver: &str,
    ) -> Result<(), TestMailError>;
}

#[cfg(test)]
mock! {
    pub TestMailService {}

    impl Clone for TestMailService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl TestMailService for TestMailService {
        async fn send_test_mail(&self, sender_identity: &str, receiver: &str) -> Result<(), TestMailError>;
    }
}

/// Test mail service implementation
#[derive(Debug, Clone)]
pub struct TestMailServiceImpl<S, M>
where
    S: StoreConfig,
    M: Mailer,
{
    store_config: Arc<S>,
    mailer: Arc<M>,
}

impl<S, M> TestMailServiceImpl<S, M>
where
    S: StoreConfig,
    M: Mailer,
{
    /// Creates a new test mail service
    pub fn new(store_config: Arc<S>, mailer: Arc<M>) -> Self {
        Self {
            store_config,
            mailer,
        }
    }

    /// Resolves the address and name configured for a sender identity
    fn sender(&self, identity: &str) -> Result<(String, Option<String>), TestMailError> {
        if !IDENTITY_REGEX.is_match(identity) {
            return Err(TestMailError::UnknownSenderIdentity(identity.to_string()));
        }

        let email = self
            .store_config
            .get_store_config(&format!("trans_email/ident_{identity}/email"))
            .ok_or_else(|| TestMailError::UnknownSenderIdentity(identity.to_string()))?;

        let name = self
            .store_config
            .get_store_config(&format!("trans_email/ident_{identity}/name"));

        Ok((email, name))
    }
}

#[async_trait]
impl<S, M> TestMailService for TestMailServiceImpl<S, M>
where
    S: StoreConfig,
    M: Mailer,
{
    async fn send_test_mail(
        &self,
        sender_identity: &str,
        receiver: &str,
    ) -> Result<(), TestMailError> {
        let (sender_email, sender_name) = self.sender(sender_identity)?;

        let mut mail = Mail::new(self.mailer.clone());

        mail.add_sender(&sender_email, sender_name.as_deref());
        mail.add_receiver(receiver, None);
        mail.set_type(TEST_MAIL_TYPE);
        mail.set_subject(TEST_MAIL_SUBJECT);
        mail.set_body(TEST_MAIL_BODY);

        match mail.send().await {
            Ok(_) => {
                info!(sender = %sender_email, receiver, "test mail sent");

                Ok(())
            }
            Err(err) => {
                warn!(sender = %sender_email, receiver, "test mail failed: {err}");

                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::domain::{
        communication::mailer::{tests::MockMailer, MailerError},
        configuration::tests::MockStoreConfig,
    };

    use super::*;

    fn general_store_config() -> MockStoreConfig {
        let mut store_config = MockStoreConfig::new();

        store_config
            .expect_get_store_config()
            .with(eq("trans_email/ident_general/email"))
            .returning(|_| Some("shop@example.com".to_string()));

        store_config
            .expect_get_store_config()
            .with(eq("trans_email/ident_general/name"))
            .returning(|_| Some("Shop".to_string()));

        store_config
    }

    #[tokio::test]
    async fn test_send_test_mail_success() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send_message()
            .times(1)
            .withf(|message| {
                let parts = message.body().parts();

                message.from().len() == 1
                    && message.from()[0].email().as_str() == "shop@example.com"
                    && message.from()[0].name() == Some("Shop")
                    && message.to().len() == 1
                    && message.to()[0].email().as_str() == "user@example.com"
                    && message.to()[0].name().is_none()
                    && message.subject() == "Test Mail"
                    && parts.len() == 1
                    && parts[0].content_type() == "text/plain"
                    && parts[0].content() == "This is a test message."
            })
            .returning(|_| Ok(()));

        let service =
            TestMailServiceImpl::new(Arc::new(general_store_config()), Arc::new(mailer));

        service.send_test_mail("general", "user@example.com").await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_send_test_mail_transport_failure() {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send_message()
            .times(1)
            .returning(|_| Err(MailerError::SendError("SMTP refused".to_string())));

        let service =
            TestMailServiceImpl::new(Arc::new(general_store_config()), Arc::new(mailer));

        let result = service.send_test_mail("general", "user@example.com").await;

        assert!(matches!(
            result,
            Err(TestMailError::Mail(MailerError::SendError(ref message))) if message == "SMTP refused"
        ));
    }

    #[tokio::test]
    async fn test_send_test_mail_invalid_receiver() {
        let mut mailer = MockMailer::new();
        mailer.expect_send_message().times(0);

        let service =
            TestMailServiceImpl::new(Arc::new(general_store_config()), Arc::new(mailer));

        let result = service.send_test_mail("general", "not an email").await;

        assert!(matches!(
            result,
            Err(TestMailError::Mail(MailerError::InvalidAddress(_)))
        ));
    }

    #[tokio::test]
    async fn test_send_test_mail_without_sender_name() -> TestResult {
        let mut store_config = MockStoreConfig::new();

        store_config
            .expect_get_store_config()
            .with(eq("trans_email/ident_sales/email"))
            .returning(|_| Some("sales@example.com".to_string()));

        store_config
            .expect_get_store_config()
            .with(eq("trans_email/ident_sales/name"))
            .returning(|_| None);

        let mut mailer = MockMailer::new();

        mailer
            .expect_send_message()
            .times(1)
            .withf(|message| message.from()[0].name().is_none())
            .returning(|_| Ok(()));

        let service = TestMailServiceImpl::new(Arc::new(store_config), Arc::new(mailer));

        service.send_test_mail("sales", "user@example.com").await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_send_test_mail_unknown_identity() {
        let mut store_config = MockStoreConfig::new();

        store_config
            .expect_get_store_config()
            .times(1)
            .returning(|_| None);

        let mut mailer = MockMailer::new();
        mailer.expect_send_message().times(0);

        let service = TestMailServiceImpl::new(Arc::new(store_config), Arc::new(mailer));

        let result = service.send_test_mail("custom3", "user@example.com").await;

        assert!(matches!(
            result,
            Err(TestMailError::UnknownSenderIdentity(ref identity)) if identity == "custom3"
        ));
    }

    #[tokio::test]
    async fn test_send_test_mail_rejects_identity_outside_trans_email() {
        let mut store_config = MockStoreConfig::new();
        store_config.expect_get_store_config().times(0);

        let mut mailer = MockMailer::new();
        mailer.expect_send_message().times(0);

        let service = TestMailServiceImpl::new(Arc::new(store_config), Arc::new(mailer));

        let result = service
            .send_test_mail("general/../../smtp", "user@example.com")
            .await;

        assert!(matches!(
            result,
            Err(TestMailError::UnknownSenderIdentity(_))
        ));
    }
}
