//! In-memory mock implementations of the persistence and revocation ports.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        jwt::fingerprint,
        use_cases::{
            post::{NewPost, PostChanges, PostProfile, PostRepo, PostWithVotes},
            session::RevocationStore,
            user::{PasswordHasher, UserCredentials, UserProfile, UserRepo},
            vote::VoteRepo,
        },
    },
};

type VoteSet = Arc<Mutex<HashSet<(i64, i64)>>>;

// ============================================================================
// InMemoryRevocationStore
// ============================================================================

/// In-memory revocation set keyed by token fingerprint, like the real backends.
#[derive(Default)]
pub struct InMemoryRevocationStore {
    revoked: RwLock<HashMap<String, Option<OffsetDateTime>>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.revoked.read().unwrap().len()
    }

    /// `None` if the token was never revoked, `Some(expiry)` otherwise.
    pub fn expiry_of(&self, token: &str) -> Option<Option<OffsetDateTime>> {
        self.revoked.read().unwrap().get(&fingerprint(token)).copied()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, token: &str, expires_at: Option<OffsetDateTime>) -> AppResult<()> {
        self.revoked
            .write()
            .unwrap()
            .entry(fingerprint(token))
            .or_insert(expires_at);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        Ok(self.revoked.read().unwrap().contains_key(&fingerprint(token)))
    }

    async fn purge_expired(&self, now: OffsetDateTime) -> AppResult<u64> {
        let mut revoked = self.revoked.write().unwrap();
        let before = revoked.len();
        revoked.retain(|_, expires_at| expires_at.is_none_or(|exp| exp > now));
        Ok((before - revoked.len()) as u64)
    }
}

// ============================================================================
// InMemoryUserRepo / PlainPasswordHasher
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<Vec<(UserProfile, String)>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn create(&self, email: &str, password_hash: &str) -> AppResult<UserProfile> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|(u, _)| u.email == email) {
            return Err(AppError::Conflict(
                "A record with this value already exists".into(),
            ));
        }

        let user = UserProfile {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            email: email.to_string(),
            created_at: Some(chrono::Utc::now().naive_utc()),
        };
        users.push((user.clone(), password_hash.to_string()));
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<UserProfile>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone()))
    }

    async fn get_credentials_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, hash)| UserCredentials {
                id: u.id,
                password_hash: hash.clone(),
            }))
    }
}

/// Reversible stand-in for argon2 so tests stay fast.
pub struct PlainPasswordHasher;

impl PasswordHasher for PlainPasswordHasher {
    fn hash(&self, password: &str) -> AppResult<String> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> AppResult<bool> {
        let stored = hash
            .strip_prefix("plain:")
            .ok_or_else(|| AppError::Internal("unreadable password hash".into()))?;
        Ok(stored == password)
    }
}

// ============================================================================
// InMemoryPostRepo / InMemoryVoteRepo
// ============================================================================

/// Posts keyed by id. Shares its vote set with [`InMemoryVoteRepo`] so counts line up.
#[derive(Default)]
pub struct InMemoryPostRepo {
    posts: Mutex<BTreeMap<i64, PostProfile>>,
    next_id: AtomicI64,
    votes: VoteSet,
}

impl InMemoryPostRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn vote_count(&self, post_id: i64) -> i64 {
        self.votes
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| *p == post_id)
            .count() as i64
    }

    fn with_votes(&self, post: PostProfile) -> PostWithVotes {
        let votes = self.vote_count(post.id);
        PostWithVotes { post, votes }
    }
}

#[async_trait]
impl PostRepo for InMemoryPostRepo {
    async fn create(&self, owner_id: i64, post: &NewPost) -> AppResult<PostProfile> {
        let profile = PostProfile {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            owner_id,
            title: post.title.clone(),
            content: post.content.clone(),
            published: post.published,
            created_at: Some(chrono::Utc::now().naive_utc()),
        };
        self.posts
            .lock()
            .unwrap()
            .insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<PostProfile>> {
        Ok(self.posts.lock().unwrap().get(&id).cloned())
    }

    async fn get_with_votes(&self, id: i64) -> AppResult<Option<PostWithVotes>> {
        let post = self.posts.lock().unwrap().get(&id).cloned();
        Ok(post.map(|p| self.with_votes(p)))
    }

    async fn list_with_votes(&self, limit: i64, offset: i64) -> AppResult<Vec<PostWithVotes>> {
        let page: Vec<PostProfile> = self
            .posts
            .lock()
            .unwrap()
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(page.into_iter().map(|p| self.with_votes(p)).collect())
    }

    async fn update(&self, id: i64, changes: &PostChanges) -> AppResult<PostProfile> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts.get_mut(&id).ok_or(AppError::NotFound)?;
        if let Some(title) = &changes.title {
            post.title = title.clone();
        }
        if let Some(content) = &changes.content {
            post.content = content.clone();
        }
        if let Some(published) = changes.published {
            post.published = published;
        }
        Ok(post.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.posts.lock().unwrap().remove(&id);
        self.votes.lock().unwrap().retain(|(p, _)| *p != id);
        Ok(())
    }
}

pub struct InMemoryVoteRepo {
    votes: VoteSet,
}

impl InMemoryVoteRepo {
    pub fn new(posts: Arc<InMemoryPostRepo>) -> Self {
        Self {
            votes: posts.votes.clone(),
        }
    }
}

#[async_trait]
impl VoteRepo for InMemoryVoteRepo {
    async fn exists(&self, post_id: i64, user_id: i64) -> AppResult<bool> {
        Ok(self.votes.lock().unwrap().contains(&(post_id, user_id)))
    }

    async fn add(&self, post_id: i64, user_id: i64) -> AppResult<()> {
        if !self.votes.lock().unwrap().insert((post_id, user_id)) {
            return Err(AppError::Conflict(
                "A record with this value already exists".into(),
            ));
        }
        Ok(())
    }

    async fn remove(&self, post_id: i64, user_id: i64) -> AppResult<bool> {
        Ok(self.votes.lock().unwrap().remove(&(post_id, user_id)))
    }
}
