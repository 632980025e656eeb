use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    authorization::ensure_owner,
    validators::{MAX_PAGE_SIZE, is_valid_page, is_valid_title},
};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PostProfile {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: Option<NaiveDateTime>,
}

/// A post together with its vote count, as returned by read endpoints.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PostWithVotes {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub post: PostProfile,
    pub votes: i64,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub published: bool,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.published.is_none()
    }
}

#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn create(&self, owner_id: i64, post: &NewPost) -> AppResult<PostProfile>;
    async fn get_by_id(&self, id: i64) -> AppResult<Option<PostProfile>>;
    async fn get_with_votes(&self, id: i64) -> AppResult<Option<PostWithVotes>>;
    async fn list_with_votes(&self, limit: i64, offset: i64) -> AppResult<Vec<PostWithVotes>>;
    async fn update(&self, id: i64, changes: &PostChanges) -> AppResult<PostProfile>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PostUseCases {
    repo: Arc<dyn PostRepo>,
}

impl PostUseCases {
    pub fn new(repo: Arc<dyn PostRepo>) -> Self {
        Self { repo }
    }

    pub async fn list_posts(&self, page: i64, page_size: i64) -> AppResult<Vec<PostWithVotes>> {
        if !is_valid_page(page, page_size) {
            return Err(AppError::InvalidInput(format!(
                "page must be >= 1 and page_size between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        let offset = (page - 1)
            .checked_mul(page_size)
            .ok_or_else(|| AppError::InvalidInput("page is out of range".into()))?;
        self.repo.list_with_votes(page_size, offset).await
    }

    pub async fn get_post(&self, id: i64) -> AppResult<PostWithVotes> {
        self.repo.get_with_votes(id).await?.ok_or(AppError::NotFound)
    }

    /// Creates a post owned by the authenticated subject.
    #[instrument(skip(self, post))]
    pub async fn create_post(&self, subject_id: i64, post: NewPost) -> AppResult<PostProfile> {
        if !is_valid_title(&post.title) {
            return Err(AppError::InvalidInput("Title must not be empty".into()));
        }
        let post = NewPost {
            title: post.title.trim().to_string(),
            ..post
        };
        self.repo.create(subject_id, &post).await
    }

    #[instrument(skip(self, changes))]
    pub async fn update_post(
        &self,
        subject_id: i64,
        id: i64,
        changes: PostChanges,
    ) -> AppResult<PostProfile> {
        let existing = self.repo.get_by_id(id).await?.ok_or(AppError::NotFound)?;
        ensure_owner(subject_id, existing.owner_id)?;

        if let Some(title) = &changes.title
            && !is_valid_title(title)
        {
            return Err(AppError::InvalidInput("Title must not be empty".into()));
        }
        if changes.is_empty() {
            return Ok(existing);
        }

        let changes = PostChanges {
            title: changes.title.map(|t| t.trim().to_string()),
            ..changes
        };
        self.repo.update(id, &changes).await
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, subject_id: i64, id: i64) -> AppResult<()> {
        let existing = self.repo.get_by_id(id).await?.ok_or(AppError::NotFound)?;
        ensure_owner(subject_id, existing.owner_id)?;
        self.repo.delete(id).await
    }
}
