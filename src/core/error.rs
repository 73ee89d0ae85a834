// Centralized error handling for the hero registry

use crate::validation::forms::FormErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the session store.
///
/// All of them are recoverable: the user retries the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Username is already taken")]
    UsernameTaken,

    #[error("Failed to persist session: {0}")]
    Storage(String),
}

/// Errors reported by the hero backend collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Hero not found: id={0}")]
    NotFound(u32),

    #[error("Backend request failed: {0}")]
    Transport(String),
}

/// Errors returned by the hero store once transport failures have been caught
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeroError {
    #[error("Hero not found: id={0}")]
    NotFound(u32),

    #[error("Hero data is unavailable: {0}")]
    Unavailable(String),
}

impl From<BackendError> for HeroError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound(id) => HeroError::NotFound(id),
            BackendError::Transport(reason) => HeroError::Unavailable(reason),
        }
    }
}

/// Errors surfaced by the HTTP shell
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Hero(#[from] HeroError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Form is invalid")]
    Validation(FormErrors),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FormErrors>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            ApiError::Auth(AuthError::UsernameTaken) => StatusCode::CONFLICT,
            ApiError::Auth(AuthError::PasswordMismatch)
            | ApiError::Auth(AuthError::PasswordTooShort) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Auth(AuthError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Hero(HeroError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Hero(HeroError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Backend(BackendError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Backend(BackendError::Transport(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();
        let fields = match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error,
                fields,
            }),
        )
            .into_response()
    }
}
