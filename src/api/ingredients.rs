use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, patch},
    Router,
};

use super::{extract::Json, ApiError, AppState, ListFilter};
use crate::auth::{jwt_auth_middleware, AuthService, CurrentUser};
use crate::models::{IngredientResponse, UpdateIngredientRequest};

/// Ingredients are created through recipe writes; the standalone surface is
/// list, rename, and delete.
pub fn ingredient_routes(state: AppState, auth_service: AuthService) -> Router {
    Router::new()
        .route("/", get(list_ingredients))
        .route(
            "/:ingredient_id",
            patch(update_ingredient)
                .put(update_ingredient)
                .delete(delete_ingredient),
        )
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// List the caller's ingredients, optionally restricted to assigned ones
async fn list_ingredients(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(filter): Query<ListFilter>,
) -> Result<Json<Vec<IngredientResponse>>, ApiError> {
    let ingredients = state
        .ingredients
        .list(user.user_id, filter.assigned_only())
        .await?;

    Ok(Json(
        ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect(),
    ))
}

/// Rename an owned ingredient
async fn update_ingredient(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(ingredient_id): Path<i64>,
    Json(request): Json<UpdateIngredientRequest>,
) -> Result<Json<IngredientResponse>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::validation("name", "must not be empty"));
    }

    let ingredient = state
        .ingredients
        .rename(user.user_id, ingredient_id, &request.name)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(IngredientResponse::from(ingredient)))
}

/// Delete an owned ingredient
async fn delete_ingredient(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(ingredient_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.ingredients.delete(user.user_id, ingredient_id).await? {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
