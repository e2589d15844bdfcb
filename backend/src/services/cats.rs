//! Cat records, scoped by owner
//!
//! Every operation on a single cat loads it first (`NotFound` if absent or
//! deleted) and then runs the ownership check before acting.

use crate::auth::{authorize_owner, AuthError, AuthPolicy, Owned, Principal};
use crate::error::ApiError;
use crate::repositories::{BreedRecord, BreedStore, CatChanges, CatRecord, CatStore, NewCat};
use cattery_shared::{CreateCatRequest, UpdateCatRequest};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct CatService {
    cats: Arc<dyn CatStore>,
    breeds: Arc<dyn BreedStore>,
    policy: AuthPolicy,
}

impl CatService {
    pub fn new(cats: Arc<dyn CatStore>, breeds: Arc<dyn BreedStore>, policy: AuthPolicy) -> Self {
        Self {
            cats,
            breeds,
            policy,
        }
    }

    /// Create a cat owned by `principal`
    pub async fn create(
        &self,
        req: CreateCatRequest,
        principal: &Principal,
    ) -> Result<CatRecord, ApiError> {
        let breed = self.resolve_breed(&req.breed).await?;

        let cat = self
            .cats
            .create(NewCat {
                name: req.name,
                age: req.age,
                breed_id: breed.id,
                owner_email: principal.email.clone(),
            })
            .await?;

        info!(cat_id = cat.id, owner = %cat.owner_email, "Cat created");
        Ok(cat)
    }

    /// Admins see every cat; everyone else sees their own
    pub async fn find_all(&self, principal: &Principal) -> Result<Vec<CatRecord>, ApiError> {
        let cats = if principal.is_admin() {
            self.cats.find_all().await?
        } else {
            self.cats.find_by_owner(&principal.email).await?
        };
        Ok(cats)
    }

    pub async fn find_one(&self, id: i64, principal: &Principal) -> Result<CatRecord, ApiError> {
        let cat = self
            .cats
            .find(id)
            .await?
            .ok_or(AuthError::NotFound(CatRecord::KIND))?;

        authorize_owner(principal, &cat).map_err(|denial| {
            info!(
                cat_id = id,
                email = %principal.email,
                owner = %cat.owner_email,
                "Ownership check denied"
            );
            self.policy.surface(denial)
        })?;

        Ok(cat)
    }

    /// Apply a partial update. Ownership never changes.
    pub async fn update(
        &self,
        id: i64,
        req: UpdateCatRequest,
        principal: &Principal,
    ) -> Result<CatRecord, ApiError> {
        self.find_one(id, principal).await?;

        let breed_id = match &req.breed {
            Some(name) => Some(self.resolve_breed(name).await?.id),
            None => None,
        };

        self.cats
            .update(
                id,
                CatChanges {
                    name: req.name,
                    age: req.age,
                    breed_id,
                },
            )
            .await?
            .ok_or_else(|| AuthError::NotFound(CatRecord::KIND).into())
    }

    /// Soft-delete a cat
    pub async fn remove(&self, id: i64, principal: &Principal) -> Result<(), ApiError> {
        self.find_one(id, principal).await?;

        if !self.cats.soft_delete(id).await? {
            return Err(AuthError::NotFound(CatRecord::KIND).into());
        }

        info!(cat_id = id, by = %principal.email, "Cat deleted");
        Ok(())
    }

    async fn resolve_breed(&self, name: &str) -> Result<BreedRecord, ApiError> {
        self.breeds
            .find_by_name(name)
            .await?
            .ok_or_else(|| ApiError::BadRequest("Breed not found".to_string()))
    }
}
