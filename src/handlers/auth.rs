use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::api::SessionResponse;
use crate::validation::forms::{LoginForm, RegistrationForm};
use axum::{extract::State, Json};
use std::sync::Arc;

/// Log in with the login dialog's fields
///
/// POST /auth/login {"username", "password"}
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<LoginForm>,
) -> Result<Json<SessionResponse>, ApiError> {
    form.validate().map_err(ApiError::Validation)?;

    let session = state.session.login(&form.username, &form.password)?;
    Ok(Json(SessionResponse::of(Some(session))))
}

/// Register and log in as the new identity
///
/// POST /auth/register {"username", "password", "confirmPassword"}
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RegistrationForm>,
) -> Result<Json<SessionResponse>, ApiError> {
    // Mismatched passwords fail here as a form-level error
    form.validate().map_err(ApiError::Validation)?;

    let session = state
        .session
        .register(&form.username, &form.password, &form.confirm_password)?;
    Ok(Json(SessionResponse::of(Some(session))))
}

/// POST /auth/logout
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionResponse>, ApiError> {
    state.session.logout()?;
    Ok(Json(SessionResponse::of(None)))
}

/// GET /auth/session
pub async fn session_handler(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    Json(SessionResponse::of(state.session.current_session()))
}
