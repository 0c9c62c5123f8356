use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::data::token_repository::TokenRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::{error::DomainError, user::User};
use crate::infrastructure::security::{hash_password, verify_password};

#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenRepository>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenRepository>) -> Self {
        Self { users, tokens }
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::Unauthenticated)
    }

    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        let email = registration.email.to_lowercase();
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailTaken);
        }
        let hash = hash_password(&registration.password)
            .map_err(|err| DomainError::Internal(err.to_string()))?;
        let user = User::new(email, registration.name, hash);
        self.users.create(user).await
    }

    /// Verifies credentials and returns the user's session token, reusing
    /// the one issued on an earlier login.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), DomainError> {
        let user = self
            .users
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !valid || !user.is_active {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.tokens.get_or_create(user.id).await?;
        info!(user_id = %user.id, "user logged in");
        Ok((token, user))
    }

    pub async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        match self.tokens.find_user(token).await? {
            Some(user) if user.is_active => Ok(user),
            Some(user) => {
                warn!(user_id = %user.id, "token presented for inactive user");
                Err(DomainError::Unauthenticated)
            }
            None => Err(DomainError::Unauthenticated),
        }
    }
}
