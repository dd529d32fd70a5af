//! Test mail module.

mod errors;
mod service;

pub use errors::TestMailError;
pub use service::{
    TestMailService, TestMailServiceImpl, TEST_MAIL_BODY, TEST_MAIL_SUBJECT, TEST_MAIL_TYPE,
};
