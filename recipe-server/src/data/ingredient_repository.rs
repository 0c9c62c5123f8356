use crate::domain::error::DomainError;
use crate::domain::ingredient::Ingredient;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait IngredientRepository: Send + Sync {
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Ingredient>, DomainError>;
    async fn find_for_owner(
        &self,
        id: i64,
        owner: Uuid,
    ) -> Result<Option<Ingredient>, DomainError>;
    async fn create(&self, owner: Uuid, name: String) -> Result<Ingredient, DomainError>;
    async fn rename(
        &self,
        id: i64,
        owner: Uuid,
        name: Option<String>,
    ) -> Result<Option<Ingredient>, DomainError>;
    async fn delete(&self, id: i64, owner: Uuid) -> Result<bool, DomainError>;
}

#[derive(Clone)]
pub struct PostgresIngredientRepository {
    pool: PgPool,
}

impl PostgresIngredientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngredientRepository for PostgresIngredientRepository {
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Ingredient>, DomainError> {
        sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, user_id, name FROM ingredients
            WHERE user_id = $1
            ORDER BY name DESC, id DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while listing ingredients for {}: {}", owner, e);
            DomainError::from(e)
        })
    }

    async fn find_for_owner(
        &self,
        id: i64,
        owner: Uuid,
    ) -> Result<Option<Ingredient>, DomainError> {
        sqlx::query_as::<_, Ingredient>(
            "SELECT id, user_id, name FROM ingredients WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find ingredient {}: {}", id, e);
            DomainError::from(e)
        })
    }

    async fn create(&self, owner: Uuid, name: String) -> Result<Ingredient, DomainError> {
        let ingredient = sqlx::query_as::<_, Ingredient>(
            "INSERT INTO ingredients (user_id, name) VALUES ($1, $2) RETURNING id, user_id, name",
        )
        .bind(owner)
        .bind(&name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create ingredient: {}", e);
            DomainError::from(e)
        })?;

        info!(ingredient_id = ingredient.id, user_id = %owner, "ingredient created");
        Ok(ingredient)
    }

    async fn rename(
        &self,
        id: i64,
        owner: Uuid,
        name: Option<String>,
    ) -> Result<Option<Ingredient>, DomainError> {
        let ingredient = sqlx::query_as::<_, Ingredient>(
            r#"
            UPDATE ingredients SET name = COALESCE($1, name)
            WHERE id = $2 AND user_id = $3
            RETURNING id, user_id, name
            "#,
        )
        .bind(name)
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update ingredient {}: {}", id, e);
            DomainError::from(e)
        })?;

        if ingredient.is_some() {
            info!(ingredient_id = id, "ingredient updated");
        }
        Ok(ingredient)
    }

    async fn delete(&self, id: i64, owner: Uuid) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM ingredients WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete ingredient {}: {}", id, e);
                DomainError::from(e)
            })?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(ingredient_id = id, "ingredient deleted");
        }
        Ok(removed)
    }
}
