use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::api::AddHeroRequest;
use crate::models::hero::HeroRecord;
use crate::validation::forms::HeroForm;
use crate::views::dashboard::top_heroes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// The hero list page
///
/// GET /heroes
pub async fn list_handler(State(state): State<Arc<AppState>>) -> Json<Vec<HeroRecord>> {
    Json(state.hero_list.load().await)
}

/// Add a hero by name and answer with the refreshed list
///
/// POST /heroes {"name"}
pub async fn add_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddHeroRequest>,
) -> Result<(StatusCode, Json<Vec<HeroRecord>>), ApiError> {
    match state.hero_list.add(&request.name).await? {
        Some(added) => {
            debug!(hero_id = added.created.id, "Hero added from list page");
            Ok((StatusCode::CREATED, Json(added.heroes)))
        }
        None => Err(ApiError::InvalidParameter(
            "Hero name must not be blank".to_string(),
        )),
    }
}

/// Delete a hero and answer with the refreshed list
///
/// DELETE /heroes/{id}
pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<Vec<HeroRecord>>, ApiError> {
    Ok(Json(state.hero_list.delete(id).await?))
}

/// The hero detail page
///
/// GET /heroes/{id}
pub async fn detail_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<HeroRecord>, ApiError> {
    Ok(Json(state.heroes.get(id).await?))
}

/// Save the detail page's edit form
///
/// PUT /heroes/{id}
pub async fn save_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Json(form): Json<HeroForm>,
) -> Result<Json<HeroRecord>, ApiError> {
    let record = form.into_record(id).map_err(ApiError::Validation)?;
    Ok(Json(state.heroes.update(record).await?))
}

/// GET /dashboard
pub async fn dashboard_handler(State(state): State<Arc<AppState>>) -> Json<Vec<HeroRecord>> {
    Json(top_heroes(&state.heroes).await)
}
