//! Breed repository

use super::StoreResult;
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BreedRecord {
    pub id: i64,
    pub name: String,
}

#[async_trait]
pub trait BreedStore: Send + Sync {
    async fn create(&self, name: &str) -> StoreResult<BreedRecord>;

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<BreedRecord>>;

    async fn find_all(&self) -> StoreResult<Vec<BreedRecord>>;
}

/// PostgreSQL-backed breed store
#[derive(Clone)]
pub struct PgBreedRepository {
    pool: PgPool,
}

impl PgBreedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BreedStore for PgBreedRepository {
    async fn create(&self, name: &str) -> StoreResult<BreedRecord> {
        let breed = sqlx::query_as::<_, BreedRecord>(
            r#"
            INSERT INTO breeds (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(breed)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<BreedRecord>> {
        let breed = sqlx::query_as::<_, BreedRecord>(
            r#"
            SELECT id, name
            FROM breeds
            WHERE name = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(breed)
    }

    async fn find_all(&self) -> StoreResult<Vec<BreedRecord>> {
        let breeds = sqlx::query_as::<_, BreedRecord>(
            r#"
            SELECT id, name
            FROM breeds
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(breeds)
    }
}
