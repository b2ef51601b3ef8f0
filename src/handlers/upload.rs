//! 图片上传代理的 HTTP 处理器

use super::{message, ok_with_message, parse_body};
use crate::{
    error::AppError,
    middleware::AppState,
    models::{auth::AdminIdentity, media::DeleteImageRequest},
    services::media_service::UploadFile,
};
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Upload exceeds the configured size limit".to_string())
    } else {
        AppError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
    }
}

/// 上传图片：multipart 字段 `file`，可选 `folder`
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    identity: AdminIdentity,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut multipart = multipart
        .map_err(|e| AppError::BadRequest(format!("Expected multipart/form-data: {}", e.body_text())))?;

    let mut file: Option<UploadFile> = None;
    let mut folder: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;

                file = Some(UploadFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            Some("folder") => {
                folder = Some(field.text().await.map_err(multipart_error)?);
            }
            // 其它字段忽略
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    let image = state.media_service.upload(file, folder.as_deref()).await?;

    tracing::info!(admin_id = %identity.id, public_id = %image.public_id, "Image uploaded by admin");
    Ok((StatusCode::CREATED, ok_with_message("Image uploaded", image)))
}

/// 删除已上传的图片：`{public_id}`
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    identity: AdminIdentity,
    payload: Result<Json<DeleteImageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = parse_body(payload)?;
    let public_id = req
        .public_id
        .ok_or_else(|| AppError::Validation("public_id is required".to_string()))?;

    if !state.media_service.destroy(&public_id).await? {
        return Err(AppError::not_found("Image"));
    }

    tracing::info!(admin_id = %identity.id, public_id = %public_id, "Image deleted by admin");
    Ok(message("Image deleted"))
}
