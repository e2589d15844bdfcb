//! Authentication routes
//!
//! `register` and `login` are anonymous. `profile` sits behind the
//! authenticate and admin-role gates.

use crate::auth::{authenticate, require_role, Principal, RoleGate};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use cattery_shared::{LoginRequest, LoginResponse, Normalize, PublicProfile, RegisterRequest, Role};

/// Create auth routes
pub fn auth_routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/profile", get(profile))
        .route_layer(from_fn_with_state(
            RoleGate::new(Role::Admin, state.policy),
            require_role,
        ))
        .route_layer(from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
}

/// POST /auth/register
///
/// Password hashing runs on the blocking thread pool.
async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<PublicProfile>)> {
    let req = req.normalize()?;
    let profile = state.auth.register(req).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let req = req.normalize()?;
    let response = state.auth.login(req).await?;
    Ok(Json(response))
}

/// GET /auth/profile (admin only)
async fn profile(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<PublicProfile>> {
    let profile = state.auth.profile(&principal).await?;
    Ok(Json(profile))
}
