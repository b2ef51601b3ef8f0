//! Service catalogue models (research services shown on the marketing site)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::SLUG_RE;

/// Service row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Service {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image_url: Option<String>,
    pub features: Vec<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create service request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,
    #[validate(regex(path = *SLUG_RE, message = "must be lowercase letters, digits and dashes"))]
    pub slug: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Update service request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateServiceRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(regex(path = *SLUG_RE, message = "must be lowercase letters, digits and dashes"))]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub summary: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub icon: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<Option<String>>,
    pub features: Option<Vec<String>>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}
