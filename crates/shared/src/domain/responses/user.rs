use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::session::Principal;
use crate::model::{AdminUser, User};

/// Doctor account as exposed over the API. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub license_number: String,
    pub specialty: Option<String>,
    pub clinic_name: Option<String>,
    pub address: Option<String>,
    pub is_approved: bool,
    pub approved_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        UserResponse {
            id: value.user_id,
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
            phone: value.phone,
            license_number: value.license_number,
            specialty: value.specialty,
            clinic_name: value.clinic_name,
            address: value.address,
            is_approved: value.is_approved,
            approved_at: value.approved_at.map(|dt| dt.to_string()),
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AdminResponse {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub created_at: Option<String>,
}

impl From<AdminUser> for AdminResponse {
    fn from(value: AdminUser) -> Self {
        AdminResponse {
            id: value.admin_id,
            username: value.username,
            email: value.email,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}

/// Who the current cookie belongs to.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SessionResponse {
    pub kind: String,
    pub id: i32,
    pub name: String,
    pub expires_in_seconds: i64,
}

impl SessionResponse {
    pub fn from_principal(principal: &Principal, expires_in_seconds: i64) -> Self {
        match principal {
            Principal::Doctor { user_id, email } => Self {
                kind: "doctor".into(),
                id: *user_id,
                name: email.clone(),
                expires_in_seconds,
            },
            Principal::Admin { admin_id, username } => Self {
                kind: "admin".into(),
                id: *admin_id,
                name: username.clone(),
                expires_in_seconds,
            },
        }
    }
}
