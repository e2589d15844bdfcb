//! In-memory store
//!
//! Implements every store trait behind one `RwLock`, so each write
//! (including the email uniqueness check in `UserStore::create`) is atomic.
//! Used with `database.backend = "memory"` and throughout the tests.

use super::{
    BreedRecord, BreedStore, CatChanges, CatRecord, CatStore, NewCat, NewUser, StoreError,
    StoreResult, UserCredentials, UserRecord, UserStore,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: HashMap<String, UserCredentials>,
    breeds: BTreeMap<i64, BreedRecord>,
    cats: BTreeMap<i64, StoredCat>,
    next_breed_id: i64,
    next_cat_id: i64,
}

struct StoredCat {
    name: String,
    age: i32,
    breed_id: i64,
    owner_email: String,
    deleted: bool,
}

impl Tables {
    fn cat(&self, id: i64) -> Option<CatRecord> {
        let stored = self.cats.get(&id).filter(|c| !c.deleted)?;
        let breed = self.breeds.get(&stored.breed_id)?;
        Some(CatRecord {
            id,
            name: stored.name.clone(),
            age: stored.age,
            breed_id: stored.breed_id,
            breed: breed.name.clone(),
            owner_email: stored.owner_email.clone(),
        })
    }

    fn live_cats(&self, keep: impl Fn(&StoredCat) -> bool) -> Vec<CatRecord> {
        self.cats
            .iter()
            .filter(|(_, c)| !c.deleted && keep(c))
            .filter_map(|(id, _)| self.cat(*id))
            .collect()
    }

    fn require_breed(&self, breed_id: i64) -> StoreResult<()> {
        if self.breeds.contains_key(&breed_id) {
            Ok(())
        } else {
            Err(StoreError::Backend(anyhow::anyhow!(
                "breed {} does not exist",
                breed_id
            )))
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(email).map(|c| c.user.clone()))
    }

    async fn find_by_email_with_credentials(
        &self,
        email: &str,
    ) -> StoreResult<Option<UserCredentials>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(email).cloned())
    }

    async fn create(&self, user: NewUser) -> StoreResult<UserRecord> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.email) {
            return Err(StoreError::Duplicate);
        }

        let record = UserRecord {
            name: user.name,
            email: user.email,
            role: user.role,
        };
        tables.users.insert(
            record.email.clone(),
            UserCredentials {
                user: record.clone(),
                password_hash: user.password_hash,
            },
        );
        Ok(record)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[async_trait]
impl BreedStore for MemoryStore {
    async fn create(&self, name: &str) -> StoreResult<BreedRecord> {
        let mut tables = self.tables.write().await;
        tables.next_breed_id += 1;
        let breed = BreedRecord {
            id: tables.next_breed_id,
            name: name.to_string(),
        };
        tables.breeds.insert(breed.id, breed.clone());
        Ok(breed)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<BreedRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.breeds.values().find(|b| b.name == name).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<BreedRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.breeds.values().cloned().collect())
    }
}

#[async_trait]
impl CatStore for MemoryStore {
    async fn create(&self, cat: NewCat) -> StoreResult<CatRecord> {
        let mut tables = self.tables.write().await;
        tables.require_breed(cat.breed_id)?;

        tables.next_cat_id += 1;
        let id = tables.next_cat_id;
        tables.cats.insert(
            id,
            StoredCat {
                name: cat.name,
                age: cat.age,
                breed_id: cat.breed_id,
                owner_email: cat.owner_email,
                deleted: false,
            },
        );
        tables
            .cat(id)
            .ok_or_else(|| StoreError::Backend(anyhow::anyhow!("cat {} vanished", id)))
    }

    async fn find(&self, id: i64) -> StoreResult<Option<CatRecord>> {
        Ok(self.tables.read().await.cat(id))
    }

    async fn find_all(&self) -> StoreResult<Vec<CatRecord>> {
        Ok(self.tables.read().await.live_cats(|_| true))
    }

    async fn find_by_owner(&self, owner_email: &str) -> StoreResult<Vec<CatRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.live_cats(|c| c.owner_email == owner_email))
    }

    async fn update(&self, id: i64, changes: CatChanges) -> StoreResult<Option<CatRecord>> {
        let mut tables = self.tables.write().await;
        if let Some(breed_id) = changes.breed_id {
            tables.require_breed(breed_id)?;
        }

        let Some(stored) = tables.cats.get_mut(&id).filter(|c| !c.deleted) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            stored.name = name;
        }
        if let Some(age) = changes.age {
            stored.age = age;
        }
        if let Some(breed_id) = changes.breed_id {
            stored.breed_id = breed_id;
        }
        Ok(tables.cat(id))
    }

    async fn soft_delete(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.cats.get_mut(&id) {
            Some(stored) if !stored.deleted => {
                stored.deleted = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
