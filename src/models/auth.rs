//! Authentication-related models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::admin::{AdminProfile, AdminRole};

/// Login request; both fields optional so that a missing one is a 400, not a 422
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub admin: AdminProfile,
}

/// Identity injected by the admin gate
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AdminIdentity {
    pub id: Uuid,
    pub role: AdminRole,
}
