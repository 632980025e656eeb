use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::vote::VoteDirection,
    use_cases::post::PostRepo,
};

#[async_trait]
pub trait VoteRepo: Send + Sync {
    async fn exists(&self, post_id: i64, user_id: i64) -> AppResult<bool>;
    async fn add(&self, post_id: i64, user_id: i64) -> AppResult<()>;
    /// Returns whether a vote was removed.
    async fn remove(&self, post_id: i64, user_id: i64) -> AppResult<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Added,
    Removed,
}

impl VoteOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            VoteOutcome::Added => "Vote added",
            VoteOutcome::Removed => "Vote removed",
        }
    }
}

#[derive(Clone)]
pub struct VoteUseCases {
    votes: Arc<dyn VoteRepo>,
    posts: Arc<dyn PostRepo>,
}

impl VoteUseCases {
    pub fn new(votes: Arc<dyn VoteRepo>, posts: Arc<dyn PostRepo>) -> Self {
        Self { votes, posts }
    }

    #[instrument(skip(self))]
    pub async fn cast_vote(&self, subject_id: i64, post_id: i64, dir: i32) -> AppResult<VoteOutcome> {
        let direction = VoteDirection::try_from(dir).map_err(AppError::InvalidInput)?;

        if self.posts.get_by_id(post_id).await?.is_none() {
            return Err(AppError::NotFound);
        }

        match direction {
            VoteDirection::Add => {
                if self.votes.exists(post_id, subject_id).await? {
                    return Err(AppError::Conflict(format!(
                        "User {subject_id} has already voted on post {post_id}"
                    )));
                }
                self.votes.add(post_id, subject_id).await?;
                Ok(VoteOutcome::Added)
            }
            VoteDirection::Remove => {
                if !self.votes.remove(post_id, subject_id).await? {
                    return Err(AppError::NotFound);
                }
                Ok(VoteOutcome::Removed)
            }
        }
    }
}
