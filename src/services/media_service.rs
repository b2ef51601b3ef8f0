//! 图片上传代理
//! 将后台上传的图片转发到 Cloudinary 兼容的媒体托管接口（签名上传 / 删除）

use crate::{config::MediaConfig, error::AppError, models::media::UploadedImage};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::multipart::{Form, Part};
use secrecy::ExposeSecret;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::time::Duration;

static FOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+(?:/[A-Za-z0-9_-]+)*$").expect("valid folder regex"));

/// 待上传的文件
#[derive(Debug)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 上游上传响应（只取需要的字段）
#[derive(Debug, Deserialize)]
struct HostUploadResponse {
    secure_url: String,
    public_id: String,
    width: Option<u32>,
    height: Option<u32>,
    format: Option<String>,
    bytes: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct HostDestroyResponse {
    result: String,
}

pub struct MediaService {
    client: reqwest::Client,
    config: MediaConfig,
}

impl MediaService {
    pub fn new(config: MediaConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.config.max_upload_bytes
    }

    /// 上传一张图片，返回托管地址与 public_id
    pub async fn upload(
        &self,
        file: UploadFile,
        folder: Option<&str>,
    ) -> Result<UploadedImage, AppError> {
        self.ensure_configured()?;

        if file.bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        if !file.content_type.starts_with("image/") {
            return Err(AppError::Validation(format!(
                "Only image uploads are accepted, got {}",
                file.content_type
            )));
        }
        if file.bytes.len() > self.config.max_upload_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Image exceeds the {} byte limit",
                self.config.max_upload_bytes
            )));
        }

        let folder = self.resolve_folder(folder)?;
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let mut params = BTreeMap::new();
        params.insert("folder", folder.clone());
        params.insert("timestamp", timestamp.clone());
        let signature = sign(&params, self.config.api_secret.expose_secret());

        let size = file.bytes.len();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| AppError::Validation(format!("Invalid content type: {}", e)))?;

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.clone())
            .text("signature", signature);

        tracing::debug!(folder = %folder, size, "Forwarding image to media host");

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Media host upload request failed: {}", e);
                AppError::Upstream(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Media host rejected upload");
            return Err(AppError::Upstream(format!("upload returned {}", status)));
        }

        let uploaded: HostUploadResponse = response.json().await.map_err(|e| {
            tracing::error!("Unexpected media host response: {}", e);
            AppError::Upstream(e.to_string())
        })?;

        tracing::info!(public_id = %uploaded.public_id, "Image uploaded");

        Ok(UploadedImage {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
            width: uploaded.width,
            height: uploaded.height,
            format: uploaded.format,
            bytes: uploaded.bytes,
        })
    }

    /// 删除托管图片；返回 false 表示上游不存在该资源
    pub async fn destroy(&self, public_id: &str) -> Result<bool, AppError> {
        self.ensure_configured()?;

        let public_id = public_id.trim();
        if public_id.is_empty() {
            return Err(AppError::Validation("public_id is required".to_string()));
        }

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let mut params = BTreeMap::new();
        params.insert("public_id", public_id.to_string());
        params.insert("timestamp", timestamp.clone());
        let signature = sign(&params, self.config.api_secret.expose_secret());

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", public_id),
                ("timestamp", timestamp.as_str()),
                ("api_key", self.config.api_key.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Media host destroy request failed: {}", e);
                AppError::Upstream(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), public_id = %public_id, "Media host rejected destroy");
            return Err(AppError::Upstream(format!("destroy returned {}", status)));
        }

        let destroyed: HostDestroyResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        Ok(destroyed.result == "ok")
    }

    fn ensure_configured(&self) -> Result<(), AppError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(AppError::ServiceUnavailable(
                "Image uploads are not configured".to_string(),
            ))
        }
    }

    fn resolve_folder(&self, requested: Option<&str>) -> Result<String, AppError> {
        match requested.map(str::trim).filter(|f| !f.is_empty()) {
            None => Ok(self.config.folder.clone()),
            Some(sub) if FOLDER_RE.is_match(sub) => Ok(format!("{}/{}", self.config.folder, sub)),
            Some(_) => Err(AppError::Validation(
                "folder may only contain letters, digits, '-', '_' and '/'".to_string(),
            )),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.cloud_name,
            action
        )
    }
}

/// 上游签名：参数按键排序拼接为 `k=v&k=v`，追加 API secret 后取 SHA-256
pub fn sign(params: &BTreeMap<&str, String>, api_secret: &str) -> String {
    let to_sign = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    format!("{:x}", hasher.finalize())
}
