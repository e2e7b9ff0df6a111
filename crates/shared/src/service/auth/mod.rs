mod admin;
mod doctor;

pub use self::admin::{AdminAuthService, AdminAuthServiceDeps, FALLBACK_ADMIN_ID};
pub use self::doctor::{AuthService, AuthServiceDeps};

use crate::{
    domain::session::{Principal, Session},
    errors::ServiceError,
    utils::generate_random_string,
};
use chrono::Utc;

const SESSION_ID_LENGTH: usize = 48;

fn open_session(principal: Principal) -> Result<Session, ServiceError> {
    let session_id = generate_random_string(SESSION_ID_LENGTH)
        .map_err(|e| ServiceError::Internal(format!("Failed to generate session id: {e}")))?;

    Ok(Session {
        session_id,
        principal,
        created_at: Utc::now().timestamp(),
    })
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_get_distinct_ids() {
        let principal = Principal::Doctor {
            user_id: 1,
            email: "a@b.example".into(),
        };
        let first = open_session(principal.clone()).unwrap();
        let second = open_session(principal).unwrap();

        assert_eq!(first.session_id.len(), SESSION_ID_LENGTH);
        assert_ne!(first.session_id, second.session_id);
    }

    #[test]
    fn emails_are_compared_case_insensitively() {
        assert_eq!(normalize_email("  Dr.Who@Clinic.Example "), "dr.who@clinic.example");
    }
}
