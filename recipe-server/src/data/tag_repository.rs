use crate::domain::error::DomainError;
use crate::domain::tag::Tag;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Owned tags, newest name first (descending name, then descending id).
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Tag>, DomainError>;
    async fn find_for_owner(&self, id: i64, owner: Uuid) -> Result<Option<Tag>, DomainError>;
    async fn create(&self, owner: Uuid, name: String) -> Result<Tag, DomainError>;
    async fn rename(
        &self,
        id: i64,
        owner: Uuid,
        name: Option<String>,
    ) -> Result<Option<Tag>, DomainError>;
    async fn delete(&self, id: i64, owner: Uuid) -> Result<bool, DomainError>;
}

#[derive(Clone)]
pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Tag>, DomainError> {
        sqlx::query_as::<_, Tag>(
            "SELECT id, user_id, name FROM tags WHERE user_id = $1 ORDER BY name DESC, id DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while listing tags for {}: {}", owner, e);
            DomainError::from(e)
        })
    }

    async fn find_for_owner(&self, id: i64, owner: Uuid) -> Result<Option<Tag>, DomainError> {
        sqlx::query_as::<_, Tag>(
            "SELECT id, user_id, name FROM tags WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find tag {}: {}", id, e);
            DomainError::from(e)
        })
    }

    async fn create(&self, owner: Uuid, name: String) -> Result<Tag, DomainError> {
        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (user_id, name) VALUES ($1, $2) RETURNING id, user_id, name",
        )
        .bind(owner)
        .bind(&name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create tag: {}", e);
            DomainError::from(e)
        })?;

        info!(tag_id = tag.id, user_id = %owner, "tag created");
        Ok(tag)
    }

    async fn rename(
        &self,
        id: i64,
        owner: Uuid,
        name: Option<String>,
    ) -> Result<Option<Tag>, DomainError> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            UPDATE tags SET name = COALESCE($1, name)
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
            error!("failed to update tag {}: {}", id, e);
            DomainError::from(e)
        })?;

        if tag.is_some() {
            info!(tag_id = id, "tag updated");
        }
        Ok(tag)
    }

    async fn delete(&self, id: i64, owner: Uuid) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM tags WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete tag {}: {}", id, e);
                DomainError::from(e)
            })?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(tag_id = id, "tag deleted");
        }
        Ok(removed)
    }
}
