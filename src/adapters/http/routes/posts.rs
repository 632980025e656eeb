//! Post CRUD routes. Reads are public; every mutation needs a bearer token and,
//! for existing posts, ownership.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use super::Data;
use crate::{
    adapters::http::{app_state::AppState, extract::CurrentSubject},
    app_error::AppResult,
    use_cases::post::{NewPost, PostChanges},
};

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

fn default_published() -> bool {
    true
}

#[derive(Deserialize)]
struct ListQuery {
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_page_size")]
    page_size: i64,
}

#[derive(Deserialize)]
struct CreatePostPayload {
    title: String,
    content: String,
    #[serde(default = "default_published")]
    published: bool,
}

#[derive(Deserialize)]
struct UpdatePostPayload {
    title: Option<String>,
    content: Option<String>,
    published: Option<bool>,
}

/// GET /api/posts?page=&page_size=
async fn list_posts(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let posts = app_state
        .post_use_cases
        .list_posts(query.page, query.page_size)
        .await?;
    Ok(Json(Data::new(posts)))
}

/// GET /api/posts/{id}
async fn get_post(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let post = app_state.post_use_cases.get_post(id).await?;
    Ok(Json(Data::new(post)))
}

/// POST /api/posts
async fn create_post(
    State(app_state): State<AppState>,
    subject: CurrentSubject,
    Json(payload): Json<CreatePostPayload>,
) -> AppResult<impl IntoResponse> {
    let post = app_state
        .post_use_cases
        .create_post(
            subject.subject_id,
            NewPost {
                title: payload.title,
                content: payload.content,
                published: payload.published,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(Data::new(post))))
}

/// PATCH /api/posts/{id}
async fn update_post(
    State(app_state): State<AppState>,
    subject: CurrentSubject,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePostPayload>,
) -> AppResult<impl IntoResponse> {
    let post = app_state
        .post_use_cases
        .update_post(
            subject.subject_id,
            id,
            PostChanges {
                title: payload.title,
                content: payload.content,
                published: payload.published,
            },
        )
        .await?;
    Ok(Json(Data::new(post)))
}

/// DELETE /api/posts/{id}
async fn delete_post(
    State(app_state): State<AppState>,
    subject: CurrentSubject,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    app_state
        .post_use_cases
        .delete_post(subject.subject_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route(
            "/{id}",
            get(get_post).patch(update_post).delete(delete_post),
        )
}
