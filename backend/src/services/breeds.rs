//! Breed catalogue

use crate::error::ApiError;
use crate::repositories::{BreedRecord, BreedStore};
use cattery_shared::CreateBreedRequest;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct BreedService {
    breeds: Arc<dyn BreedStore>,
}

impl BreedService {
    pub fn new(breeds: Arc<dyn BreedStore>) -> Self {
        Self { breeds }
    }

    pub async fn create(&self, req: CreateBreedRequest) -> Result<BreedRecord, ApiError> {
        let breed = self.breeds.create(&req.name).await?;
        info!(breed_id = breed.id, name = %breed.name, "Breed created");
        Ok(breed)
    }

    pub async fn find_all(&self) -> Result<Vec<BreedRecord>, ApiError> {
        Ok(self.breeds.find_all().await?)
    }
}
