use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use crate::{
    app_error::AppError,
    domain::entities::auth::{AuthResult, UnauthenticatedReason},
    use_cases::session::SessionUseCases,
};

/// The authenticated caller, resolved from `Authorization: Bearer <token>`.
///
/// Rejects with 401 when the header is missing or the token does not verify.
#[derive(Debug, Clone)]
pub struct CurrentSubject {
    pub subject_id: i64,
    pub token: String,
}

impl<S> FromRequestParts<S> for CurrentSubject
where
    Arc<SessionUseCases>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or(AppError::Unauthenticated(UnauthenticatedReason::Invalid))?;

        let session = Arc::<SessionUseCases>::from_ref(state);
        match session.verify(token).await? {
            AuthResult::Authenticated { subject_id } => Ok(CurrentSubject {
                subject_id,
                token: token.to_owned(),
            }),
            AuthResult::Unauthenticated { reason } => {
                tracing::debug!(reason = %reason, "Bearer token rejected");
                Err(AppError::Unauthenticated(reason))
            }
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
