use std::sync::Arc;

use crate::data::ingredient_repository::IngredientRepository;
use crate::domain::error::DomainError;
use crate::domain::ingredient::Ingredient;
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct IngredientService {
    repo: Arc<dyn IngredientRepository>,
}

impl IngredientService {
    pub fn new(repo: Arc<dyn IngredientRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_ingredients(&self, owner: Uuid) -> Result<Vec<Ingredient>, DomainError> {
        self.repo.list_for_owner(owner).await
    }

    pub async fn get_ingredient(&self, owner: Uuid, id: i64) -> Result<Ingredient, DomainError> {
        self.repo
            .find_for_owner(id, owner)
            .await?
            .ok_or_else(|| DomainError::ingredient_not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn create_ingredient(
        &self,
        owner: Uuid,
        name: String,
    ) -> Result<Ingredient, DomainError> {
        self.repo.create(owner, name).await
    }

    #[instrument(skip(self))]
    pub async fn update_ingredient(
        &self,
        owner: Uuid,
        id: i64,
        name: Option<String>,
    ) -> Result<Ingredient, DomainError> {
        self.repo
            .rename(id, owner, name)
            .await?
            .ok_or_else(|| DomainError::ingredient_not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_ingredient(&self, owner: Uuid, id: i64) -> Result<(), DomainError> {
        if self.repo.delete(id, owner).await? {
            Ok(())
        } else {
            Err(DomainError::ingredient_not_found(id))
        }
    }
}
