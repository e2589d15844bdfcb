//! API request and response types

use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub email: String,
}

/// Account fields safe to show to the account holder.
/// Never carries a password or digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub name: String,
    pub email: String,
}

// ============================================================================
// Cat and Breed Types
// ============================================================================

/// Create cat request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCatRequest {
    pub name: String,
    pub age: i32,
    /// Breed name; must already exist
    pub breed: String,
}

/// Partial cat update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCatRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub breed: Option<String>,
}

/// Cat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub breed: String,
    pub owner_email: String,
}

/// Create breed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBreedRequest {
    pub name: String,
}

/// Breed response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedResponse {
    pub id: i64,
    pub name: String,
}
