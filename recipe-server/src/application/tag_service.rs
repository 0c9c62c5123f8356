use std::sync::Arc;

use crate::data::tag_repository::TagRepository;
use crate::domain::error::DomainError;
use crate::domain::tag::Tag;
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct TagService {
    repo: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(repo: Arc<dyn TagRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_tags(&self, owner: Uuid) -> Result<Vec<Tag>, DomainError> {
        self.repo.list_for_owner(owner).await
    }

    pub async fn get_tag(&self, owner: Uuid, id: i64) -> Result<Tag, DomainError> {
        self.repo
            .find_for_owner(id, owner)
            .await?
            .ok_or_else(|| DomainError::tag_not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn create_tag(&self, owner: Uuid, name: String) -> Result<Tag, DomainError> {
        self.repo.create(owner, name).await
    }

    #[instrument(skip(self))]
    pub async fn update_tag(
        &self,
        owner: Uuid,
        id: i64,
        name: Option<String>,
    ) -> Result<Tag, DomainError> {
        self.repo
            .rename(id, owner, name)
            .await?
            .ok_or_else(|| DomainError::tag_not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_tag(&self, owner: Uuid, id: i64) -> Result<(), DomainError> {
        if self.repo.delete(id, owner).await? {
            Ok(())
        } else {
            Err(DomainError::tag_not_found(id))
        }
    }
}
