use crate::domain::repository::TagRepository;
use crate::domain::types::Tag;
use crate::error::FoodgramError;

// ── ListTags ─────────────────────────────────────────────────────────────────

pub struct ListTagsUseCase<T: TagRepository> {
    pub repo: T,
}

impl<T: TagRepository> ListTagsUseCase<T> {
    pub async fn execute(&self) -> Result<Vec<Tag>, FoodgramError> {
        self.repo.list().await
    }
}

// ── GetTag ───────────────────────────────────────────────────────────────────

pub struct GetTagUseCase<T: TagRepository> {
    pub repo: T,
}

impl<T: TagRepository> GetTagUseCase<T> {
    pub async fn execute(&self, id: i32) -> Result<Tag, FoodgramError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(FoodgramError::TagNotFound)
    }
}
