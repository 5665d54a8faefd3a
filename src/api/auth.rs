use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};

use super::extract::Json;
use crate::auth::{
    jwt_auth_middleware, AuthError, AuthResponse, AuthService, CurrentUser, LoginRequest,
    RegisterRequest, UserInfo,
};

/// Authentication routes
pub fn auth_routes(auth_service: AuthService) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route(
            "/me",
            get(me).route_layer(middleware::from_fn_with_state(
                auth_service.clone(),
                jwt_auth_middleware,
            )),
        )
        .with_state(auth_service)
}

/// Register a new user
#[tracing::instrument(skip(auth_service, request))]
async fn register(
    State(auth_service): State<AuthService>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    let response = auth_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password
#[tracing::instrument(skip(auth_service, request))]
async fn login(
    State(auth_service): State<AuthService>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = auth_service.login(request).await?;
    Ok(Json(response))
}

/// Return the authenticated user's profile
#[tracing::instrument(skip(auth_service))]
async fn me(
    State(auth_service): State<AuthService>,
    user: CurrentUser,
) -> Result<Json<UserInfo>, AuthError> {
    let user = auth_service
        .get_user(user.user_id)
        .await?
        .ok_or(AuthError::InvalidToken)?;

    Ok(Json(UserInfo::from(user)))
}
