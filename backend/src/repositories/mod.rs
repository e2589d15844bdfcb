//! Data repositories
//!
//! Each record type has an async store trait with a PostgreSQL
//! implementation. [`MemoryStore`] implements all of them for development
//! and tests.

pub mod breed;
pub mod cat;
pub mod memory;
pub mod user;

pub use breed::{BreedRecord, BreedStore, PgBreedRepository};
pub use cat::{CatChanges, CatRecord, CatStore, NewCat, PgCatRepository};
pub use memory::MemoryStore;
pub use user::{NewUser, PgUserRepository, UserCredentials, UserRecord, UserStore};

use thiserror::Error;

/// Store failure
#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("unique constraint violated")]
    Duplicate,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate,
            _ => StoreError::Backend(err.into()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
