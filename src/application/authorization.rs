use crate::{
    app_error::{AppError, AppResult},
    domain::entities::auth::Decision,
};

/// Ownership rule for update/delete: only the owner may mutate a resource.
pub fn authorize_mutation(subject_id: i64, resource_owner_id: i64) -> Decision {
    if subject_id == resource_owner_id {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

/// Same rule as [`authorize_mutation`], as an error for `?` chains.
pub fn ensure_owner(subject_id: i64, resource_owner_id: i64) -> AppResult<()> {
    match authorize_mutation(subject_id, resource_owner_id) {
        Decision::Allow => Ok(()),
        Decision::Deny => {
            tracing::debug!(subject_id, resource_owner_id, "Mutation denied: not the owner");
            Err(AppError::Forbidden)
        }
    }
}
