//! Page content sections (hero blocks, about text, etc.)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Page section row, unique per (page, section)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PageContent {
    pub id: Uuid,
    pub page: String,
    pub section: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePageContentRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub page: String,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub section: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePageContentRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub page: Option<String>,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub section: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub subtitle: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub body: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<Option<String>>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// `?page=home` filter; absent means every page
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

fn default_true() -> bool {
    true
}
