use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Principal {
    Doctor { user_id: i32, email: String },
    Admin { admin_id: i32, username: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub principal: Principal,
    pub created_at: i64,
}

impl Session {
    pub fn doctor_id(&self) -> Option<i32> {
        match self.principal {
            Principal::Doctor { user_id, .. } => Some(user_id),
            Principal::Admin { .. } => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.principal, Principal::Admin { .. })
    }
}

/// Result of a successful login: the stored session plus the body to return.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession<T> {
    pub session: Session,
    pub ttl_seconds: i64,
    pub response: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_is_tagged_by_kind() {
        let session = Session {
            session_id: "abc".into(),
            principal: Principal::Admin {
                admin_id: 0,
                username: "root".into(),
            },
            created_at: 0,
        };

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["principal"]["kind"], "admin");
        assert!(session.is_admin());
        assert_eq!(session.doctor_id(), None);
    }
}
