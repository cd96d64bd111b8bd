use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use wheel_shared::constants::TICKET_USED;

#[derive(Debug)]
pub enum Error {
    Auth(crate::auth::AuthError),
    TicketUsed,
    InvalidRequest(&'static str),
    EmptyCatalogue,
    Internal,
}

impl From<crate::auth::AuthError> for Error {
    fn from(err: crate::auth::AuthError) -> Self {
        Error::Auth(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::Auth(e) => return e.into_response(),
            // the client matches on this exact marker
            Error::TicketUsed => (StatusCode::CONFLICT, TICKET_USED.to_string()),
            Error::InvalidRequest(reason) => (StatusCode::BAD_REQUEST, reason.to_string()),
            Error::EmptyCatalogue => (StatusCode::SERVICE_UNAVAILABLE, "No prizes configured".to_string()),
            Error::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
