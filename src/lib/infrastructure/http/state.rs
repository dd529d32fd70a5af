//! Application state module

use std::{fmt, sync::Arc};

use crate::domain::communication::test_mail::TestMailService;

/// Global application state
#[derive(Clone)]
pub struct AppState<T: TestMailService> {
    /// Test mail service
    pub test_mail: Arc<T>,
}

impl<T: TestMailService> AppState<T> {
    /// Create a new application state
    pub fn new(test_mail: T) -> Self {
        Self {
            test_mail: Arc::new(test_mail),
        }
    }
}

impl<T: TestMailService> fmt::Debug for AppState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("test_mail", &"TestMailService")
            .finish()
    }
}

#[cfg(test)]
pub mod tests {
    use crate::domain::communication::test_mail::tests::MockTestMailService;

    use super::*;

    /// Application state around an optional mocked test mail service
    pub fn test_state(test_mail: Option<MockTestMailService>) -> AppState<MockTestMailService> {
        AppState::new(test_mail.unwrap_or_default())
    }
}
