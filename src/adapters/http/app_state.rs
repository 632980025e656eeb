use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    infra::config::AppConfig,
    use_cases::{
        post::PostUseCases, session::SessionUseCases, user::UserUseCases, vote::VoteUseCases,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session_use_cases: Arc<SessionUseCases>,
    pub user_use_cases: Arc<UserUseCases>,
    pub post_use_cases: Arc<PostUseCases>,
    pub vote_use_cases: Arc<VoteUseCases>,
}

impl FromRef<AppState> for Arc<SessionUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.session_use_cases.clone()
    }
}
