use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure of the document store; callers see a generic fetch failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("requested document doesn't exist")]
    NotFound,
    #[error("document already exists")]
    AlreadyExists,
    #[error("document store request failed: {0}")]
    FetchFailed(#[source] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Clone, Debug, Error)]
pub enum ValidationError {
    #[error("input value is invalid: `{value}`, reason: {reason}")]
    InvalidInput { value: String, reason: String },
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::Store(StoreError::NotFound) => (StatusCode::NOT_FOUND, "not found".into()),
            Self::Store(e @ StoreError::AlreadyExists) => (StatusCode::CONFLICT, e.to_string()),
            Self::Store(e) => {
                error!("received internal error for user request: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".into(),
                )
            }
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
        };
        let error = json!({ "error": error }).to_string();
        (status, error).into_response()
    }
}

#[derive(Clone, Debug)]
pub enum SessionError {
    BadToken,
    TokenNotFound,
    TokenExpired,
    Internal,
}

impl From<StoreError> for SessionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound | StoreError::AlreadyExists => Self::TokenNotFound,
            StoreError::FetchFailed(e) => {
                error!("failed to resolve session: {e}");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::BadToken => (StatusCode::BAD_REQUEST, "Missing or bad token in request"),
            Self::TokenNotFound => (StatusCode::UNAUTHORIZED, "Token cannot be found"),
            Self::TokenExpired => (StatusCode::UNAUTHORIZED, "Token has expired"),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong"),
        };
        let error = json!({ "error": error }).to_string();
        (status, error).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_404() {
        let response = RequestError::Store(StoreError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_error_maps_to_400() {
        let response = RequestError::from(ValidationError::InvalidInput {
            value: "".to_string(),
            reason: "empty".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicate_maps_to_409_and_fetch_failure_is_generic() {
        assert_eq!(
            RequestError::Store(StoreError::AlreadyExists)
                .into_response()
                .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            RequestError::Store(StoreError::FetchFailed(sqlx::Error::PoolTimedOut))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
