use std::sync::Arc;

use crate::data::recipe_repository::RecipeRepository;
use crate::domain::error::DomainError;
use crate::domain::recipe::{NewRecipe, Recipe, RecipeChanges};
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct RecipeService {
    repo: Arc<dyn RecipeRepository>,
}

impl RecipeService {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_recipes(&self, owner: Uuid) -> Result<Vec<Recipe>, DomainError> {
        self.repo.list_for_owner(owner).await
    }

    pub async fn get_recipe(&self, owner: Uuid, id: i64) -> Result<Recipe, DomainError> {
        self.repo
            .find_for_owner(id, owner)
            .await?
            .ok_or_else(|| DomainError::recipe_not_found(id))
    }

    #[instrument(skip(self, recipe))]
    pub async fn create_recipe(
        &self,
        owner: Uuid,
        recipe: NewRecipe,
    ) -> Result<Recipe, DomainError> {
        self.repo.create(owner, recipe).await
    }

    #[instrument(skip(self, changes))]
    pub async fn update_recipe(
        &self,
        owner: Uuid,
        id: i64,
        changes: RecipeChanges,
    ) -> Result<Recipe, DomainError> {
        self.repo
            .update(id, owner, changes)
            .await?
            .ok_or_else(|| DomainError::recipe_not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_recipe(&self, owner: Uuid, id: i64) -> Result<(), DomainError> {
        if self.repo.delete(id, owner).await? {
            Ok(())
        } else {
            Err(DomainError::recipe_not_found(id))
        }
    }
}
