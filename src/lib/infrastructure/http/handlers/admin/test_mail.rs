//! Send test mail handler

use axum::{
    extract::{rejection::FormRejection, State},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::communication::test_mail::{TestMailError, TestMailService},
    infrastructure::http::{
        errors::{ApiError, ErrorResponse},
        state::AppState,
    },
};

/// Confirmation returned once the test mail was handed to the transport
pub const SUCCESS_MESSAGE: &str = "The message was successfully sent.";

/// Send test mail form
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TestMailForm {
    /// The sender identity key, e.g. `general`, `sales` or `support`
    #[serde(rename = "infrangible_simple_mail_test_mail_sender")]
    #[schema(example = "general")]
    sender: String,

    /// The address to send the test mail to
    #[serde(rename = "infrangible_simple_mail_test_mail_receiver")]
    #[schema(example = "user@example.com")]
    receiver: String,
}

/// Send test mail response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TestMailResponse {
    /// Whether the mail was sent
    success: bool,

    /// The confirmation or the reason the mail could not be sent
    #[schema(example = "The message was successfully sent.")]
    message: String,
}

impl TestMailResponse {
    fn success(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    fn error(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

/// Send a test mail from a configured sender identity
#[utoipa::path(
    post,
    operation_id = "send_test_mail",
    tag = "Mail",
    path = "/admin/simple_mail/mail/test",
    request_body(content = TestMailForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Test mail sent, or the mail error that prevented it", body = TestMailResponse, example = json!({ "success": false, "message": "SMTP refused" })),
        (status = 422, description = "Unknown sender identity or invalid form", body = ErrorResponse, example = json!({ "error": "Unknown sender identity \"custom3\"" })),
    )
)]
pub async fn handler<T: TestMailService>(
    State(state): State<AppState<T>>,
    form: Result<Form<TestMailForm>, FormRejection>,
) -> Result<Json<TestMailResponse>, ApiError> {
    let Form(form) = form?;

    match state
        .test_mail
        .send_test_mail(&form.sender, &form.receiver)
        .await
    {
        Ok(()) => Ok(Json(TestMailResponse::success(SUCCESS_MESSAGE))),
        Err(TestMailError::Mail(err)) => Ok(Json(TestMailResponse::error(&err.to_string()))),
        Err(err) => Err(err.into()),
    }
}
