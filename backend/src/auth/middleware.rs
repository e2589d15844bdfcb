//! Request gates
//!
//! Gates run in a fixed order before the handler: [`authenticate`] turns a
//! bearer token into a [`Principal`], then [`require_role`] checks it.
//! Both are plain functions wired with `axum::middleware::from_fn_with_state`:
//!
//! ```ignore
//! Router::new()
//!     .route("/profile", get(profile))
//!     .route_layer(from_fn_with_state(RoleGate::new(Role::Admin, policy), require_role))
//!     .route_layer(from_fn_with_state(state.clone(), authenticate))
//! ```
//!
//! The layer added last runs first.

use super::error::{AuthError, TokenRejection};
use super::policy::AuthPolicy;
use super::principal::Principal;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use cattery_shared::Role;
use tracing::{debug, info};

/// Verify the bearer token and attach the resulting [`Principal`]
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = bearer_token(request.headers())
        .and_then(|token| state.jwt().verify(token))
        .map(Principal::from)
        .map_err(|rejection| {
            debug!(reason = %rejection, path = %request.uri().path(), "Rejected request");
            AuthError::InvalidToken(rejection)
        })?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, TokenRejection> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(TokenRejection::Missing)?
        .to_str()
        .map_err(|_| TokenRejection::Malformed)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(TokenRejection::Malformed)?
        .trim();

    if token.is_empty() {
        return Err(TokenRejection::Missing);
    }
    Ok(token)
}

/// Role requirement for a group of routes
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    pub required: Role,
    pub policy: AuthPolicy,
}

impl RoleGate {
    pub fn new(required: Role, policy: AuthPolicy) -> Self {
        Self { required, policy }
    }
}

/// Pure role check: admin satisfies any requirement
pub fn check_role(principal: &Principal, required: Role) -> Result<(), AuthError> {
    if principal.role.satisfies(required) {
        Ok(())
    } else {
        Err(AuthError::InsufficientRole(required))
    }
}

/// Deny the request unless the attached principal holds the gate's role.
///
/// Must run after [`authenticate`]; with no principal attached it rejects.
pub async fn require_role(
    State(gate): State<RoleGate>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = request
        .extensions()
        .get::<Principal>()
        .ok_or(AuthError::InvalidToken(TokenRejection::Missing))?;

    if let Err(denial) = check_role(principal, gate.required) {
        info!(
            email = %principal.email,
            role = %principal.role,
            required = %gate.required,
            path = %request.uri().path(),
            "Role check denied"
        );
        return Err(gate.policy.surface(denial).into());
    }

    Ok(next.run(request).await)
}
