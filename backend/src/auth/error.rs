//! Authentication and authorization failures
//!
//! Every failure the auth core can produce is a value of [`AuthError`].
//! The HTTP boundary decides how much of it a caller gets to see.

use cattery_shared::Role;
use thiserror::Error;

/// Why a bearer token was not accepted.
///
/// Only used for logs; callers always see a single "invalid token" category.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    #[error("missing bearer token")]
    Missing,
    #[error("malformed token")]
    Malformed,
    #[error("bad signature")]
    BadSignature,
    #[error("token expired")]
    Expired,
    /// A role or ownership denial reported as a token failure
    #[error("denial concealed as token failure")]
    Concealed,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email already exists")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(TokenRejection),

    #[error("Requires role '{0}'")]
    InsufficientRole(Role),

    #[error("Not the owner of this resource")]
    NotOwner(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl From<TokenRejection> for AuthError {
    fn from(rejection: TokenRejection) -> Self {
        AuthError::InvalidToken(rejection)
    }
}
