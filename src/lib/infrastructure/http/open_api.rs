//! OpenAPI module

use utoipa::OpenApi;

use crate::infrastructure::http::{errors::ErrorResponse, handlers::admin::*};

/// OpenAPI document of the HTTP API
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Simple Mail"),
    paths(test_mail::handler),
    components(schemas(test_mail::TestMailForm, test_mail::TestMailResponse, ErrorResponse))
)]
pub struct ApiDocs;
