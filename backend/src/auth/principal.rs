//! The authenticated identity attached to a request

use super::error::{AuthError, TokenRejection};
use super::jwt::Claims;
use crate::error::ApiError;
use axum::{extract::FromRequestParts, http::request::Parts};
use cattery_shared::Role;

/// Identity rebuilt from a verified token, once per request.
///
/// Only [`super::authenticate`] inserts it into request extensions, so a
/// handler that extracts it knows the token behind it was verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
            role: claims.role,
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| AuthError::InvalidToken(TokenRejection::Missing).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_extractor_fails_closed_without_guard() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        let result = Principal::from_request_parts(&mut parts, &()).await;

        assert!(matches!(
            result,
            Err(ApiError::Auth(AuthError::InvalidToken(TokenRejection::Missing)))
        ));
    }

    #[tokio::test]
    async fn test_extractor_reads_attached_principal() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        parts
            .extensions
            .insert(Principal::new("ann@x.com", Role::User));

        let principal = Principal::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(principal.email, "ann@x.com");
    }
}
