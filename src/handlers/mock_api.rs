//! The mock REST collection at `/api/heroes`.
//!
//! Served straight from a [`HeroBackend`] so another instance, or any HTTP
//! client, can use this process as its hero backend.

use crate::backend::HeroBackend;
use crate::core::error::ApiError;
use crate::models::hero::{HeroRecord, NewHero};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

pub type MockState = Arc<dyn HeroBackend>;

/// GET /api/heroes
pub async fn list_handler(State(backend): State<MockState>) -> Result<Json<Vec<HeroRecord>>, ApiError> {
    Ok(Json(backend.list().await?))
}

/// GET /api/heroes/{id}
pub async fn get_handler(
    State(backend): State<MockState>,
    Path(id): Path<u32>,
) -> Result<Json<HeroRecord>, ApiError> {
    Ok(Json(backend.get(id).await?))
}

/// POST /api/heroes
pub async fn create_handler(
    State(backend): State<MockState>,
    Json(hero): Json<NewHero>,
) -> Result<(StatusCode, Json<HeroRecord>), ApiError> {
    Ok((StatusCode::CREATED, Json(backend.create(hero).await?)))
}

/// PUT /api/heroes/{id}
pub async fn update_handler(
    State(backend): State<MockState>,
    Path(id): Path<u32>,
    Json(hero): Json<HeroRecord>,
) -> Result<Json<HeroRecord>, ApiError> {
    if hero.id != id {
        return Err(ApiError::InvalidParameter(format!(
            "Body id {} does not match path id {}",
            hero.id, id
        )));
    }
    Ok(Json(backend.update(hero).await?))
}

/// DELETE /api/heroes/{id}
pub async fn delete_handler(
    State(backend): State<MockState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, ApiError> {
    backend.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
