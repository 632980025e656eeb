use serde::Serialize;

/// Why a presented bearer token did not authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnauthenticatedReason {
    Revoked,
    Invalid,
    Expired,
    MissingSubject,
}

impl UnauthenticatedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnauthenticatedReason::Revoked => "revoked",
            UnauthenticatedReason::Invalid => "invalid",
            UnauthenticatedReason::Expired => "expired",
            UnauthenticatedReason::MissingSubject => "missing_subject",
        }
    }
}

impl std::fmt::Display for UnauthenticatedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of verifying a bearer token. Produced per request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthResult {
    Authenticated { subject_id: i64 },
    Unauthenticated { reason: UnauthenticatedReason },
}

impl AuthResult {
    pub fn unauthenticated(reason: UnauthenticatedReason) -> Self {
        AuthResult::Unauthenticated { reason }
    }

    pub fn subject_id(&self) -> Option<i64> {
        match self {
            AuthResult::Authenticated { subject_id } => Some(*subject_id),
            AuthResult::Unauthenticated { .. } => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthResult::Authenticated { .. })
    }
}

/// Ownership decision for update/delete on an owned resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_id_only_for_authenticated() {
        let ok = AuthResult::Authenticated { subject_id: 42 };
        assert_eq!(ok.subject_id(), Some(42));
        assert!(ok.is_authenticated());

        let rejected = AuthResult::unauthenticated(UnauthenticatedReason::Expired);
        assert_eq!(rejected.subject_id(), None);
        assert!(!rejected.is_authenticated());
    }

    #[test]
    fn reason_display_matches_serde() {
        for reason in [
            UnauthenticatedReason::Revoked,
            UnauthenticatedReason::Invalid,
            UnauthenticatedReason::Expired,
            UnauthenticatedReason::MissingSubject,
        ] {
            let json = serde_json::to_value(reason).unwrap();
            assert_eq!(json.as_str(), Some(reason.to_string().as_str()));
        }
    }
}
