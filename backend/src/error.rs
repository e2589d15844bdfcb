//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use crate::auth::AuthError;
use crate::repositories::StoreError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cattery_shared::{ErrorDetail, ErrorResponse, ValidationError};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => {
                ApiError::Internal(anyhow::anyhow!("unexpected unique constraint violation"))
            }
            StoreError::Backend(e) => ApiError::Internal(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// `Json` whose rejections (bad syntax, missing fields, wrong content type)
/// come back in the same error envelope as every other failure
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                err.message.clone(),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Auth(err) => match err {
                AuthError::EmailTaken => (StatusCode::BAD_REQUEST, "EMAIL_TAKEN", err.to_string()),
                AuthError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    err.to_string(),
                ),
                // The rejection reason is for logs only
                AuthError::InvalidToken(_) => (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    "Invalid or missing token".to_string(),
                ),
                AuthError::InsufficientRole(_) => (
                    StatusCode::UNAUTHORIZED,
                    "INSUFFICIENT_ROLE",
                    err.to_string(),
                ),
                AuthError::NotOwner(_) => {
                    (StatusCode::UNAUTHORIZED, "NOT_OWNER", err.to_string())
                }
                AuthError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
                AuthError::Internal(cause) => {
                    error!("Internal error: {:?}", cause);
                    internal()
                }
            },
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                internal()
            }
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let field = match &self {
            ApiError::Validation(err) => Some(err.field.to_string()),
            _ => None,
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenRejection;
    use cattery_shared::Role;
    use rstest::rstest;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[rstest]
    #[case(AuthError::EmailTaken, StatusCode::BAD_REQUEST)]
    #[case(AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED)]
    #[case(AuthError::InvalidToken(TokenRejection::Expired), StatusCode::UNAUTHORIZED)]
    #[case(AuthError::InsufficientRole(Role::Admin), StatusCode::UNAUTHORIZED)]
    #[case(AuthError::NotOwner("Cat"), StatusCode::UNAUTHORIZED)]
    #[case(AuthError::NotFound("Cat"), StatusCode::NOT_FOUND)]
    fn test_auth_error_status(#[case] err: AuthError, #[case] expected: StatusCode) {
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), expected);
    }

    #[tokio::test]
    async fn test_token_rejections_share_one_message() {
        let mut messages = Vec::new();
        for rejection in [
            TokenRejection::Missing,
            TokenRejection::Malformed,
            TokenRejection::BadSignature,
            TokenRejection::Expired,
            TokenRejection::Concealed,
        ] {
            let response = ApiError::from(AuthError::InvalidToken(rejection)).into_response();
            messages.push(body_json(response).await);
        }
        assert!(messages.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[tokio::test]
    async fn test_json_rejection_uses_error_envelope() {
        use axum::{body::Body, http::Request, routing::post, Router};
        use cattery_shared::LoginRequest;
        use tower::ServiceExt;

        async fn echo(ApiJson(req): ApiJson<LoginRequest>) -> String {
            req.email
        }
        let app = Router::new().route("/", post(echo));

        for body in [r#"{"email": "ann@x.com"}"#, "{not json"] {
            let request = Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "BAD_REQUEST");
            assert!(json["error"]["message"].as_str().is_some());
        }

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"email": "ann@x.com", "password": "x"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_internal_error_detail_not_exposed() {
        let err = AuthError::Internal(anyhow::anyhow!("connection refused on 10.0.0.3"));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn test_validation_error_names_field() {
        let err = ValidationError::new("email", "Invalid email format");
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["field"], "email");
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
