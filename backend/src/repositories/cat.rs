//! Cat repository
//!
//! Cats are soft-deleted: a deleted cat keeps its row but is invisible to
//! every query here.

use super::StoreResult;
use crate::auth::Owned;
use async_trait::async_trait;
use sqlx::PgPool;

/// Cat with its breed name resolved
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CatRecord {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub breed_id: i64,
    pub breed: String,
    pub owner_email: String,
}

impl Owned for CatRecord {
    const KIND: &'static str = "Cat";

    fn owner_email(&self) -> &str {
        &self.owner_email
    }
}

/// Input for creating a cat
#[derive(Debug, Clone)]
pub struct NewCat {
    pub name: String,
    pub age: i32,
    pub breed_id: i64,
    pub owner_email: String,
}

/// Partial update. The owner is not updatable.
#[derive(Debug, Clone, Default)]
pub struct CatChanges {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub breed_id: Option<i64>,
}

#[async_trait]
pub trait CatStore: Send + Sync {
    async fn create(&self, cat: NewCat) -> StoreResult<CatRecord>;

    async fn find(&self, id: i64) -> StoreResult<Option<CatRecord>>;

    async fn find_all(&self) -> StoreResult<Vec<CatRecord>>;

    async fn find_by_owner(&self, owner_email: &str) -> StoreResult<Vec<CatRecord>>;

    /// Returns `None` when the cat does not exist or is deleted
    async fn update(&self, id: i64, changes: CatChanges) -> StoreResult<Option<CatRecord>>;

    /// Returns false when there was no live cat to delete
    async fn soft_delete(&self, id: i64) -> StoreResult<bool>;
}

const SELECT_CATS: &str = r#"
    SELECT c.id, c.name, c.age, c.breed_id, b.name AS breed, c.owner_email
    FROM cats c
    JOIN breeds b ON b.id = c.breed_id
"#;

/// PostgreSQL-backed cat store
#[derive(Clone)]
pub struct PgCatRepository {
    pool: PgPool,
}

impl PgCatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatStore for PgCatRepository {
    async fn create(&self, cat: NewCat) -> StoreResult<CatRecord> {
        let created = sqlx::query_as::<_, CatRecord>(
            r#"
            WITH inserted AS (
                INSERT INTO cats (name, age, breed_id, owner_email)
                VALUES ($1, $2, $3, $4)
                RETURNING id, name, age, breed_id, owner_email
            )
            SELECT i.id, i.name, i.age, i.breed_id, b.name AS breed, i.owner_email
            FROM inserted i
            JOIN breeds b ON b.id = i.breed_id
            "#,
        )
        .bind(&cat.name)
        .bind(cat.age)
        .bind(cat.breed_id)
        .bind(&cat.owner_email)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<CatRecord>> {
        let cat = sqlx::query_as::<_, CatRecord>(&format!(
            "{SELECT_CATS} WHERE c.id = $1 AND c.deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cat)
    }

    async fn find_all(&self) -> StoreResult<Vec<CatRecord>> {
        let cats = sqlx::query_as::<_, CatRecord>(&format!(
            "{SELECT_CATS} WHERE c.deleted_at IS NULL ORDER BY c.id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(cats)
    }

    async fn find_by_owner(&self, owner_email: &str) -> StoreResult<Vec<CatRecord>> {
        let cats = sqlx::query_as::<_, CatRecord>(&format!(
            "{SELECT_CATS} WHERE c.owner_email = $1 AND c.deleted_at IS NULL ORDER BY c.id"
        ))
        .bind(owner_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(cats)
    }

    async fn update(&self, id: i64, changes: CatChanges) -> StoreResult<Option<CatRecord>> {
        let updated = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE cats SET
                name = COALESCE($2, name),
                age = COALESCE($3, age),
                breed_id = COALESCE($4, breed_id),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.age)
        .bind(changes.breed_id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(id) => self.find(id).await,
            None => Ok(None),
        }
    }

    async fn soft_delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE cats SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
