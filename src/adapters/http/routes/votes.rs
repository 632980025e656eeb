use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use serde::{Deserialize, Serialize};

use super::Data;
use crate::{
    adapters::http::{app_state::AppState, extract::CurrentSubject},
    app_error::AppResult,
};

#[derive(Deserialize)]
struct VotePayload {
    post_id: i64,
    dir: i32,
}

#[derive(Serialize)]
struct VoteResponse {
    message: &'static str,
}

/// POST /api/votes
/// `dir` 1 adds the caller's vote, 0 removes it.
async fn cast_vote(
    State(app_state): State<AppState>,
    subject: CurrentSubject,
    Json(payload): Json<VotePayload>,
) -> AppResult<impl IntoResponse> {
    let outcome = app_state
        .vote_use_cases
        .cast_vote(subject.subject_id, payload.post_id, payload.dir)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(Data::new(VoteResponse {
            message: outcome.message(),
        })),
    ))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", post(cast_vote))
}
