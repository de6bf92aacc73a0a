use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sign-in failures; the message is shown to the visitor verbatim.
#[derive(Clone, Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    BadCredentials,
    #[error("email and password are required")]
    MissingCredentials,
    #[error("too many login attempts, try again in a minute")]
    TooManyAttempts,
    #[error("unable to start a session")]
    TokenCreation,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct ErrorResponse<'a> {
    error: &'a str,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BadCredentials => StatusCode::UNAUTHORIZED,
            Self::MissingCredentials => StatusCode::BAD_REQUEST,
            Self::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            Self::TokenCreation => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.to_string();
        let body = serde_json::to_string(&ErrorResponse { error: &message })
            .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"));
        (status, body).into_response()
    }
}
