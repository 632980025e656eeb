//! Login, logout and who-am-i routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use super::Data;
use crate::{
    adapters::http::{app_state::AppState, extract::CurrentSubject},
    app_error::AppResult,
};

#[derive(Deserialize)]
struct LoginPayload {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct SessionResponse {
    subject_id: i64,
}

/// POST /api/login
async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<impl IntoResponse> {
    let issued = app_state
        .session_use_cases
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(Data::new(issued)))
}

/// POST /api/logout
/// Revokes the presented bearer token; it is rejected from then on.
async fn logout(
    State(app_state): State<AppState>,
    subject: CurrentSubject,
) -> AppResult<impl IntoResponse> {
    app_state.session_use_cases.logout(&subject.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/session
async fn session(subject: CurrentSubject) -> impl IntoResponse {
    Json(Data::new(SessionResponse {
        subject_id: subject.subject_id,
    }))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session))
}
