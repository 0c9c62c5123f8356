use crate::domain::error::DomainError;
use crate::domain::user::User;
use crate::infrastructure::security::generate_token_key;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error};
use uuid::Uuid;

/// Server-side storage of opaque session tokens, one per user.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Returns the user's existing token, creating one on first login.
    async fn get_or_create(&self, user_id: Uuid) -> Result<String, DomainError>;
    async fn find_user(&self, key: &str) -> Result<Option<User>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresTokenRepository {
    pool: PgPool,
}

impl PostgresTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PostgresTokenRepository {
    async fn get_or_create(&self, user_id: Uuid) -> Result<String, DomainError> {
        // The no-op update makes RETURNING yield the surviving row on conflict.
        let key: String = sqlx::query_scalar(
            r#"
            INSERT INTO auth_tokens (key, user_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING key
            "#,
        )
        .bind(generate_token_key())
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to issue token for user {}: {}", user_id, e);
            DomainError::from(e)
        })?;

        debug!(user_id = %user_id, "token issued");
        Ok(key)
    }

    async fn find_user(&self, key: &str) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.name, u.password_hash, u.is_active, u.created_at
            FROM auth_tokens t
            JOIN users u ON u.id = t.user_id
            WHERE t.key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to resolve token: {}", e);
            DomainError::from(e)
        })
    }
}
