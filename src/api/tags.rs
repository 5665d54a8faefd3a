use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, patch},
    Router,
};

use super::{extract::Json, ApiError, AppState, ListFilter};
use crate::auth::{jwt_auth_middleware, AuthService, CurrentUser};
use crate::models::{TagResponse, UpdateTagRequest};

/// Tags are created through recipe writes; the standalone surface is
/// list, rename, and delete.
pub fn tag_routes(state: AppState, auth_service: AuthService) -> Router {
    Router::new()
        .route("/", get(list_tags))
        .route("/:tag_id", patch(update_tag).put(update_tag).delete(delete_tag))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// List the caller's tags, optionally restricted to those assigned to a recipe
async fn list_tags(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(filter): Query<ListFilter>,
) -> Result<Json<Vec<TagResponse>>, ApiError> {
    let tags = state
        .tags
        .list(user.user_id, filter.assigned_only())
        .await?;

    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

/// Rename an owned tag
async fn update_tag(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(tag_id): Path<i64>,
    Json(request): Json<UpdateTagRequest>,
) -> Result<Json<TagResponse>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::validation("name", "must not be empty"));
    }

    let tag = state
        .tags
        .rename(user.user_id, tag_id, &request.name)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(TagResponse::from(tag)))
}

/// Delete an owned tag; recipe join rows cascade, recipes stay
async fn delete_tag(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(tag_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.tags.delete(user.user_id, tag_id).await? {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
