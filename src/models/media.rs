//! Media upload models

use serde::{Deserialize, Serialize};

/// What the site stores after an upload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: Option<String>,
    pub bytes: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteImageRequest {
    #[serde(default)]
    pub public_id: Option<String>,
}
