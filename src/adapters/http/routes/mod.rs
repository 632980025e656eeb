pub mod posts;
pub mod session;
pub mod users;
pub mod votes;

use axum::Router;
use serde::Serialize;

use crate::adapters::http::app_state::AppState;

/// Success envelope shared by every JSON response.
#[derive(Debug, Serialize)]
pub(crate) struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub(crate) fn new(data: T) -> Self {
        Self { data }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(session::router())
        .nest("/users", users::router())
        .nest("/posts", posts::router())
        .nest("/votes", votes::router())
}
