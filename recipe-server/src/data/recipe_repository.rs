use crate::domain::error::DomainError;
use crate::domain::recipe::{NewRecipe, Recipe, RecipeChanges};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

/// Recipe storage. Every lookup and mutation is scoped to `owner`; rows
/// belonging to someone else behave as if they did not exist.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Recipe>, DomainError>;
    async fn find_for_owner(&self, id: i64, owner: Uuid) -> Result<Option<Recipe>, DomainError>;
    async fn create(&self, owner: Uuid, recipe: NewRecipe) -> Result<Recipe, DomainError>;
    async fn update(
        &self,
        id: i64,
        owner: Uuid,
        changes: RecipeChanges,
    ) -> Result<Option<Recipe>, DomainError>;
    /// Returns `false` when no owned row matched.
    async fn delete(&self, id: i64, owner: Uuid) -> Result<bool, DomainError>;
}

#[derive(Clone)]
pub struct PostgresRecipeRepository {
    pool: PgPool,
}

impl PostgresRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const RECIPE_COLUMNS: &str =
    "id, user_id, title, time_minutes, price, link, description, created_at, updated_at";

#[async_trait]
impl RecipeRepository for PostgresRecipeRepository {
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Recipe>, DomainError> {
        sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE user_id = $1 ORDER BY id DESC"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while listing recipes for {}: {}", owner, e);
            DomainError::from(e)
        })
    }

    async fn find_for_owner(&self, id: i64, owner: Uuid) -> Result<Option<Recipe>, DomainError> {
        sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_for_owner {}: {}", id, e);
            DomainError::from(e)
        })
    }

    async fn create(&self, owner: Uuid, recipe: NewRecipe) -> Result<Recipe, DomainError> {
        let created = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            INSERT INTO recipes (user_id, title, time_minutes, price, link, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(owner)
        .bind(&recipe.title)
        .bind(recipe.time_minutes)
        .bind(recipe.price)
        .bind(&recipe.link)
        .bind(&recipe.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create recipe: {}", e);
            DomainError::from(e)
        })?;

        info!(recipe_id = created.id, user_id = %owner, "recipe created");
        Ok(created)
    }

    async fn update(
        &self,
        id: i64,
        owner: Uuid,
        changes: RecipeChanges,
    ) -> Result<Option<Recipe>, DomainError> {
        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            UPDATE recipes
            SET
                title = COALESCE($1, title),
                time_minutes = COALESCE($2, time_minutes),
                price = COALESCE($3, price),
                link = COALESCE($4, link),
                description = COALESCE($5, description),
                updated_at = NOW()
            WHERE id = $6 AND user_id = $7
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(changes.title)
        .bind(changes.time_minutes)
        .bind(changes.price)
        .bind(changes.link)
        .bind(changes.description)
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update recipe {}: {}", id, e);
            DomainError::from(e)
        })?;

        if recipe.is_some() {
            info!(recipe_id = id, "recipe updated");
        }

        Ok(recipe)
    }

    async fn delete(&self, id: i64, owner: Uuid) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete recipe {}: {}", id, e);
                DomainError::from(e)
            })?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(recipe_id = id, "recipe deleted");
        }
        Ok(removed)
    }
}
