//! Admin panel handlers

use axum::{routing::post, Router};

use crate::{
    domain::communication::test_mail::TestMailService, infrastructure::http::state::AppState,
};

pub mod test_mail;

/// Routes of the admin panel
pub fn router<T: TestMailService>() -> Router<AppState<T>> {
    Router::new().route("/simple_mail/mail/test", post(test_mail::handler::<T>))
}
