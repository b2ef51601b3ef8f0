//! Blog post models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::SLUG_RE;

/// Blog post row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create blog request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlogRequest {
    #[validate(length(min = 1, max = 250, message = "must be 1-250 characters"))]
    pub title: String,
    #[validate(regex(path = *SLUG_RE, message = "must be lowercase letters, digits and dashes"))]
    pub slug: String,
    pub excerpt: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
    #[validate(url(message = "must be a valid URL"))]
    pub cover_image: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
}

/// Update blog request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBlogRequest {
    #[validate(length(min = 1, max = 250, message = "must be 1-250 characters"))]
    pub title: Option<String>,
    #[validate(regex(path = *SLUG_RE, message = "must be lowercase letters, digits and dashes"))]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub excerpt: Option<Option<String>>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    #[validate(url(message = "must be a valid URL"))]
    pub cover_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub author: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

/// Public blog listing query
#[derive(Debug, Deserialize)]
pub struct BlogListQuery {
    pub tag: Option<String>,
    #[serde(default = "super::default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
