//! Application state management
//!
//! Everything handlers need is built once here at startup and passed
//! explicitly: stores first, then the services that depend on them.
//! All fields are cheap to clone and read-only afterwards; the signing key
//! in particular is never written after construction.

use crate::auth::{AuthPolicy, JwtService, PasswordService};
use crate::config::AppConfig;
use crate::repositories::{
    BreedStore, CatStore, MemoryStore, PgBreedRepository, PgCatRepository, PgUserRepository,
    UserStore,
};
use crate::services::{AuthService, BreedService, CatService};
use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

/// The stores the services are built on
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub cats: Arc<dyn CatStore>,
    pub breeds: Arc<dyn BreedStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            cats: Arc::new(PgCatRepository::new(pool.clone())),
            breeds: Arc::new(PgBreedRepository::new(pool)),
        }
    }

    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            cats: store.clone(),
            breeds: store,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub policy: AuthPolicy,
    pub auth: AuthService,
    pub cats: CatService,
    pub breeds: BreedService,
    users: Arc<dyn UserStore>,
}

impl AppState {
    /// Build services from configuration and stores
    ///
    /// Derives the signing keys and the login timing digest, so call this
    /// once at startup.
    pub fn new(stores: Stores, config: AppConfig) -> Result<Self> {
        let policy = AuthPolicy::from(&config.auth);
        let jwt = JwtService::from_config(&config.jwt);
        let passwords = PasswordService::new(&config.password)?;

        Ok(Self {
            auth: AuthService::new(stores.users.clone(), jwt, passwords)?,
            cats: CatService::new(stores.cats, stores.breeds.clone(), policy),
            breeds: BreedService::new(stores.breeds),
            users: stores.users,
            policy,
            config: Arc::new(config),
        })
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(config: AppConfig) -> Result<Self> {
        Self::new(Stores::memory(), config)
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        self.auth.jwt()
    }

    /// Credential store, for readiness checks
    #[inline]
    pub fn users(&self) -> &Arc<dyn UserStore> {
        &self.users
    }
}
