use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{default_page, default_page_size};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllUsers {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,

    /// `true` for approved doctors, `false` for the approval queue.
    pub approved: Option<bool>,
}

/// Row to insert for a new doctor; the password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateDoctorRecord {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub license_number: String,
    pub specialty: Option<String>,
    pub clinic_name: Option<String>,
    pub address: Option<String>,
}
