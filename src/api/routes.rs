use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

use super::auth::auth_routes;
use super::health::health_check;
use super::ingredients::ingredient_routes;
use super::recipes::recipe_routes;
use super::tags::tag_routes;
use crate::auth::middleware::cors_layer;
use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::services::{ImageStorageService, IngredientService, RecipeService, TagService};

#[derive(Clone)]
pub struct AppState {
    pub recipes: RecipeService,
    pub tags: TagService,
    pub ingredients: IngredientService,
    pub images: ImageStorageService,
}

/// The router behind trailing-slash normalization, so `/api/recipes` and
/// `/api/recipes/` hit the same route. Normalization has to wrap the router
/// from the outside; a plain `Router::layer` would run after routing.
pub type App = NormalizePath<Router>;

pub fn create_routes(db: PgPool, config: &AppConfig) -> App {
    let auth_service = AuthService::new(db.clone(), &config.jwt_secret);

    let state = AppState {
        recipes: RecipeService::new(db.clone()),
        tags: TagService::new(db.clone()),
        ingredients: IngredientService::new(db),
        images: ImageStorageService::new(config.media_root.clone()),
    };

    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes(auth_service.clone()))
        .nest("/api/recipes", recipe_routes(state.clone(), auth_service.clone()))
        .nest("/api/tags", tag_routes(state.clone(), auth_service.clone()))
        .nest("/api/ingredients", ingredient_routes(state, auth_service))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer());

    NormalizePath::trim_trailing_slash(router)
}
