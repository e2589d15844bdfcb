//! How denials are reported to callers

use super::error::{AuthError, TokenRejection};
use crate::config::AuthPolicyConfig;
use tracing::debug;

/// Disclosure rules for authorization failures.
///
/// Decisions are made before this is consulted; it only rewrites what the
/// caller sees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthPolicy {
    pub uniform_denials: bool,
    pub hide_foreign_records: bool,
}

impl From<&AuthPolicyConfig> for AuthPolicy {
    fn from(config: &AuthPolicyConfig) -> Self {
        Self {
            uniform_denials: config.uniform_denials,
            hide_foreign_records: config.hide_foreign_records,
        }
    }
}

impl AuthPolicy {
    /// Rewrite a denial into the form the caller is allowed to see
    pub fn surface(&self, err: AuthError) -> AuthError {
        match err {
            AuthError::NotOwner(kind) if self.hide_foreign_records => AuthError::NotFound(kind),
            denial @ (AuthError::InsufficientRole(_) | AuthError::NotOwner(_))
                if self.uniform_denials =>
            {
                debug!(denial = %denial, "Concealing denial");
                AuthError::InvalidToken(TokenRejection::Concealed)
            }
            other => other,
        }
    }
}
