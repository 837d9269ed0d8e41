use chrono::NaiveDate;
use models::user::Role;
use serde::{Deserialize, Serialize};

use crate::patch::Patch;

/// Create input. Every field is optional at the wire level so missing values surface as
/// validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub registration_date: Option<NaiveDate>,
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub email: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub password: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub role: Patch<Role>,
}
