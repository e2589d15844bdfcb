//! Breed routes: anyone signed in can list, only admins can add

use crate::auth::{authenticate, require_role, RoleGate};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use cattery_shared::{BreedResponse, CreateBreedRequest, Normalize, Role};

/// Create breed routes
pub fn breed_routes(state: &AppState) -> Router<AppState> {
    let list = get(list_breeds).route_layer(from_fn_with_state(
        RoleGate::new(Role::User, state.policy),
        require_role,
    ));
    let create = post(create_breed).route_layer(from_fn_with_state(
        RoleGate::new(Role::Admin, state.policy),
        require_role,
    ));

    Router::new()
        .route("/", list.merge(create))
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}

/// POST /breeds (admin only)
async fn create_breed(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateBreedRequest>,
) -> ApiResult<(StatusCode, Json<BreedResponse>)> {
    let req = req.normalize()?;
    let breed = state.breeds.create(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(BreedResponse {
            id: breed.id,
            name: breed.name,
        }),
    ))
}

/// GET /breeds
async fn list_breeds(State(state): State<AppState>) -> ApiResult<Json<Vec<BreedResponse>>> {
    let breeds = state.breeds.find_all().await?;
    Ok(Json(
        breeds
            .into_iter()
            .map(|b| BreedResponse {
                id: b.id,
                name: b.name,
            })
            .collect(),
    ))
}
