//! Cat routes
//!
//! All routes require an authenticated USER (admins pass too). Single-cat
//! routes are additionally subject to the ownership check in `CatService`.

use crate::auth::{authenticate, require_role, Principal, RoleGate};
use crate::error::{ApiJson, ApiResult};
use crate::repositories::CatRecord;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use cattery_shared::{CatResponse, CreateCatRequest, Normalize, Role, UpdateCatRequest};

/// Create cat routes
pub fn cat_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_cat).get(list_cats))
        .route("/:id", get(get_cat).patch(update_cat).delete(delete_cat))
        .route_layer(from_fn_with_state(
            RoleGate::new(Role::User, state.policy),
            require_role,
        ))
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}

fn to_response(cat: CatRecord) -> CatResponse {
    CatResponse {
        id: cat.id,
        name: cat.name,
        age: cat.age,
        breed: cat.breed,
        owner_email: cat.owner_email,
    }
}

/// POST /cats
async fn create_cat(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(req): ApiJson<CreateCatRequest>,
) -> ApiResult<(StatusCode, Json<CatResponse>)> {
    let req = req.normalize()?;
    let cat = state.cats.create(req, &principal).await?;
    Ok((StatusCode::CREATED, Json(to_response(cat))))
}

/// GET /cats
async fn list_cats(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<Vec<CatResponse>>> {
    let cats = state.cats.find_all(&principal).await?;
    Ok(Json(cats.into_iter().map(to_response).collect()))
}

/// GET /cats/:id
async fn get_cat(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> ApiResult<Json<CatResponse>> {
    let cat = state.cats.find_one(id, &principal).await?;
    Ok(Json(to_response(cat)))
}

/// PATCH /cats/:id
async fn update_cat(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<UpdateCatRequest>,
) -> ApiResult<Json<CatResponse>> {
    let req = req.normalize()?;
    let cat = state.cats.update(id, req, &principal).await?;
    Ok(Json(to_response(cat)))
}

/// DELETE /cats/:id (soft delete)
async fn delete_cat(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.cats.remove(id, &principal).await?;
    Ok(StatusCode::NO_CONTENT)
}
