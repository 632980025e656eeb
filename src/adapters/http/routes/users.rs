use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;

use super::Data;
use crate::{adapters::http::app_state::AppState, app_error::AppResult};

#[derive(Deserialize)]
struct RegisterPayload {
    email: String,
    password: String,
}

/// POST /api/users
async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> AppResult<impl IntoResponse> {
    let user = app_state
        .user_use_cases
        .register(&payload.email, &payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(Data::new(user))))
}

/// GET /api/users/{id}
async fn get_user(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let user = app_state.user_use_cases.get_user(id).await?;
    Ok(Json(Data::new(user)))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register))
        .route("/{id}", get(get_user))
}
