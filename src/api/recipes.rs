use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use rust_decimal::Decimal;

use super::{extract::Json, ApiError, AppState};
use crate::auth::{jwt_auth_middleware, AuthService, CurrentUser};
use crate::models::{
    CreateRecipeRequest, NameRef, RecipeDetail, RecipeImageResponse, RecipeSummary,
    UpdateRecipeRequest,
};
use crate::services::ImageStorageService;

pub fn recipe_routes(state: AppState, auth_service: AuthService) -> Router {
    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route(
            "/:recipe_id",
            get(get_recipe)
                .patch(update_recipe)
                .put(replace_recipe)
                .delete(delete_recipe),
        )
        .route("/:recipe_id/image", post(upload_recipe_image))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// List the caller's recipes as summaries, newest first
async fn list_recipes(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<RecipeSummary>>, ApiError> {
    let recipes = state.recipes.list(user.user_id).await?;

    Ok(Json(recipes.into_iter().map(RecipeSummary::from).collect()))
}

/// Create a recipe owned by the caller
async fn create_recipe(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeDetail>), ApiError> {
    validate_write(&request)?;

    let detail = state.recipes.create(user.user_id, request).await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

/// Retrieve one owned recipe in full detail
async fn get_recipe(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(recipe_id): Path<i64>,
) -> Result<Json<RecipeDetail>, ApiError> {
    let detail = state
        .recipes
        .detail(user.user_id, recipe_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(detail))
}

/// Partial update of an owned recipe
async fn update_recipe(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(recipe_id): Path<i64>,
    Json(request): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeDetail>, ApiError> {
    validate_partial(&request)?;

    let detail = state
        .recipes
        .update(user.user_id, recipe_id, request)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(detail))
}

/// Full replace of an owned recipe; omitted optional fields are cleared
async fn replace_recipe(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(recipe_id): Path<i64>,
    Json(request): Json<CreateRecipeRequest>,
) -> Result<Json<RecipeDetail>, ApiError> {
    validate_write(&request)?;

    let detail = state
        .recipes
        .replace(user.user_id, recipe_id, request)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(detail))
}

/// Delete an owned recipe
async fn delete_recipe(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(recipe_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.recipes.delete(user.user_id, recipe_id).await? {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Upload a recipe image from a multipart `image` field. Replaces the stored
/// reference on success; an invalid payload leaves the existing image intact.
#[tracing::instrument(skip(state, multipart))]
async fn upload_recipe_image(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(recipe_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<RecipeImageResponse>, ApiError> {
    let recipe = state
        .recipes
        .get(user.user_id, recipe_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let mut payload: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::validation("image", "malformed multipart payload"))?
    {
        if field.name() != Some("image") {
            continue;
        }

        if let Some(content_type) = field.content_type() {
            if let Ok(mime) = content_type.parse::<mime::Mime>() {
                if mime.type_() != mime::IMAGE {
                    return Err(ApiError::validation("image", "content type must be image/*"));
                }
            }
        }

        payload = Some(
            field
                .bytes()
                .await
                .map_err(|_| ApiError::validation("image", "failed to read image payload"))?,
        );
    }

    let data = payload.ok_or_else(|| ApiError::validation("image", "no image file provided"))?;

    let format = ImageStorageService::validate(&data)
        .map_err(|err| ApiError::validation("image", err.to_string()))?;

    let reference = state.images.store_recipe_image(&data, format).await?;

    if !state
        .recipes
        .set_image(user.user_id, recipe_id, &reference)
        .await?
    {
        // Recipe vanished between the ownership check and the write
        state.images.remove(&reference).await;
        return Err(ApiError::NotFound);
    }

    if let Some(old) = recipe.image {
        state.images.remove(&old).await;
    }

    Ok(Json(RecipeImageResponse { image: reference }))
}

fn validate_write(request: &CreateRecipeRequest) -> Result<(), ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::validation("title", "must not be empty"));
    }
    if request.time_minutes < 0 {
        return Err(ApiError::validation("time_minutes", "must be non-negative"));
    }
    if request.price < Decimal::ZERO {
        return Err(ApiError::validation("price", "must be non-negative"));
    }
    validate_refs(&request.tags, "tags")?;
    validate_refs(&request.ingredients, "ingredients")?;

    Ok(())
}

fn validate_partial(request: &UpdateRecipeRequest) -> Result<(), ApiError> {
    if let Some(title) = &request.title {
        if title.trim().is_empty() {
            return Err(ApiError::validation("title", "must not be empty"));
        }
    }
    if let Some(time_minutes) = request.time_minutes {
        if time_minutes < 0 {
            return Err(ApiError::validation("time_minutes", "must be non-negative"));
        }
    }
    if let Some(price) = request.price {
        if price < Decimal::ZERO {
            return Err(ApiError::validation("price", "must be non-negative"));
        }
    }
    validate_refs(&request.tags, "tags")?;
    validate_refs(&request.ingredients, "ingredients")?;

    Ok(())
}

fn validate_refs(refs: &Option<Vec<NameRef>>, field: &str) -> Result<(), ApiError> {
    if let Some(refs) = refs {
        if refs.iter().any(|r| r.name.trim().is_empty()) {
            return Err(ApiError::validation(field, "names must not be empty"));
        }
    }

    Ok(())
}
