//! JWT token generation and validation
//!
//! Tokens are HS256-signed and carry `{email, role, iat, exp, jti}`.
//! Keys are computed once from the configured secret and shared across
//! handlers; verification pins the algorithm instead of trusting the header.

use super::error::TokenRejection;
use super::principal::Principal;
use crate::config::JwtConfig;
use anyhow::Result;
use cattery_shared::Role;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token ID, logged on issue for correlation
    pub jti: String,
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: Arc::new(EncodingKey::from_secret(bytes)),
            decoding: Arc::new(DecodingKey::from_secret(bytes)),
        }
    }
}

/// JWT service for token operations
///
/// Cheap to clone; the keys and validation rules are shared.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    access_token_ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &SecretString, access_token_expiry_secs: i64) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            access_token_ttl: Duration::seconds(access_token_expiry_secs),
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(&config.secret, config.access_token_expiry_secs)
    }

    /// Issue an access token with the configured lifetime
    #[inline]
    pub fn issue(&self, principal: &Principal) -> Result<String> {
        self.sign(principal, self.access_token_ttl)
    }

    /// Sign a token for `principal` that expires `ttl` from now
    pub fn sign(&self, principal: &Principal, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            email: principal.email.clone(),
            role: principal.role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))?;

        debug!(jti = %claims.jti, exp = claims.exp, "Issued access token");
        Ok(token)
    }

    /// Validate a token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenRejection> {
        decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenRejection::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenRejection::BadSignature
                }
                _ => TokenRejection::Malformed,
            })
    }

    /// Access token lifetime in seconds
    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_token_ttl.num_seconds()
    }
}
