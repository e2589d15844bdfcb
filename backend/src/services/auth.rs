//! Registration, login and profile resolution
//!
//! Login failures are normalized: an unknown email, a wrong password and any
//! unexpected error all come back as `InvalidCredentials`. The cause is
//! logged here and not returned.

use crate::auth::{AuthError, JwtService, PasswordService, Principal};
use crate::repositories::{NewUser, StoreError, UserStore};
use anyhow::Result;
use cattery_shared::{LoginRequest, LoginResponse, PublicProfile, RegisterRequest, Role};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt: JwtService,
    passwords: PasswordService,
    /// Verified against when the email is unknown, so both failure paths
    /// pay for one hash verification
    dummy_digest: Arc<str>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt: JwtService, passwords: PasswordService) -> Result<Self> {
        let dummy_digest = passwords.hash("timing-equalizer")?.into();
        Ok(Self {
            users,
            jwt,
            passwords,
            dummy_digest,
        })
    }

    /// Create a USER account
    pub async fn register(&self, req: RegisterRequest) -> Result<PublicProfile, AuthError> {
        self.register_with_role(req, Role::User).await
    }

    /// Create an account with an explicit role.
    ///
    /// Uniqueness is decided by the store's `create`, not by a prior lookup,
    /// so two concurrent registrations for one email cannot both succeed.
    pub async fn register_with_role(
        &self,
        req: RegisterRequest,
        role: Role,
    ) -> Result<PublicProfile, AuthError> {
        let password_hash = self.passwords.hash_async(req.password).await?;

        let new_user = NewUser {
            name: req.name,
            email: req.email,
            password_hash,
            role,
        };

        match self.users.create(new_user).await {
            Ok(user) => {
                info!(email = %user.email, role = %user.role, "Registered user");
                Ok(PublicProfile {
                    name: user.name,
                    email: user.email,
                })
            }
            Err(StoreError::Duplicate) => Err(AuthError::EmailTaken),
            Err(StoreError::Backend(e)) => Err(AuthError::Internal(e)),
        }
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AuthError> {
        let email = req.email.clone();
        match self.try_login(req).await {
            Ok(Some(response)) => {
                info!(email = %email, "Login succeeded");
                Ok(response)
            }
            Ok(None) => {
                info!(email = %email, "Login rejected");
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => {
                error!(email = %email, error = ?e, "Login failed unexpectedly");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// `Ok(None)` means the credentials did not match
    async fn try_login(&self, req: LoginRequest) -> Result<Option<LoginResponse>> {
        let credentials = self.users.find_by_email_with_credentials(&req.email).await?;

        let digest = match &credentials {
            Some(c) => c.password_hash.clone(),
            None => self.dummy_digest.to_string(),
        };
        let valid = self.passwords.verify_async(req.password, digest).await?;

        let Some(credentials) = credentials.filter(|_| valid) else {
            return Ok(None);
        };

        let principal = Principal::new(credentials.user.email, credentials.user.role);
        let access_token = self.jwt.issue(&principal)?;

        Ok(Some(LoginResponse {
            access_token,
            email: principal.email,
        }))
    }

    /// Current stored profile for an authenticated principal
    pub async fn profile(&self, principal: &Principal) -> Result<PublicProfile, AuthError> {
        let user = self
            .users
            .find_by_email(&principal.email)
            .await
            .map_err(|e| AuthError::Internal(e.into()))?
            .ok_or(AuthError::NotFound("User"))?;

        Ok(PublicProfile {
            name: user.name,
            email: user.email,
        })
    }

    /// Create the configured admin account unless the email is already taken
    pub async fn ensure_admin(&self, req: RegisterRequest) -> Result<(), AuthError> {
        let email = req.email.clone();
        match self.register_with_role(req, Role::Admin).await {
            Ok(_) => {
                info!(email = %email, "Bootstrap admin created");
                Ok(())
            }
            Err(AuthError::EmailTaken) => {
                warn!(email = %email, "Bootstrap admin email already registered; left untouched");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
