//! Site settings (contact details, social links, SEO defaults)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::SETTING_KEY_RE;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Setting {
    pub id: Uuid,
    pub key: String,
    pub value: String,
    pub category: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSettingRequest {
    #[validate(regex(path = *SETTING_KEY_RE, message = "must be lowercase snake_case or dotted"))]
    pub key: String,
    pub value: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSettingRequest {
    #[validate(regex(path = *SETTING_KEY_RE, message = "must be lowercase snake_case or dotted"))]
    pub key: Option<String>,
    pub value: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub description: Option<Option<String>>,
    pub is_public: Option<bool>,
}

/// Admin settings listing filter
#[derive(Debug, Deserialize)]
pub struct SettingQuery {
    pub category: Option<String>,
}

fn default_category() -> String {
    "general".to_string()
}

fn default_true() -> bool {
    true
}
