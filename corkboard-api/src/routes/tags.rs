/// Tag endpoints
///
/// # Endpoints
///
/// - `GET  /api/tags` - All tags, name order
/// - `POST /api/tags` - Create a tag
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use corkboard_shared::models::tag::Tag;
use serde::Deserialize;

/// Create tag request
#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    /// Unique tag name
    pub name: Option<String>,
}

/// List all tags
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<Vec<Tag>>> {
    let tags = state.store.list_tags().await?;
    Ok(Json(tags))
}

/// Create a tag
///
/// # Errors
///
/// - `400 Bad Request`: missing name
/// - `409 Conflict`: name already exists
pub async fn create_tag(
    State(state): State<AppState>,
    Json(req): Json<CreateTagRequest>,
) -> ApiResult<(StatusCode, Json<Tag>)> {
    let name = req
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("name is required".to_string()))?;

    let tag = state.store.create_tag(&name).await?;

    Ok((StatusCode::CREATED, Json(tag)))
}
