//! 服务项目（services）的后台 CRUD 与公开读取

use super::{created, message, ok, ok_with_message, path_id, validated_body};
use crate::{
    error::AppError,
    middleware::AppState,
    models::service::{CreateServiceRequest, UpdateServiceRequest},
    repository::ServiceRepository,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// 后台列表（含未启用）
pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let services = ServiceRepository::new(state.db.clone()).list(false).await?;
    Ok(ok(services))
}

pub async fn get_service(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    let service = ServiceRepository::new(state.db.clone())
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Service"))?;

    Ok(ok(service))
}

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateServiceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = validated_body(payload)?;
    let service = ServiceRepository::new(state.db.clone()).create(&req).await?;

    tracing::info!(service_id = %service.id, slug = %service.slug, "Service created");
    Ok(created("Service created", service))
}

pub async fn update_service(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateServiceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    let req = validated_body(payload)?;

    let service = ServiceRepository::new(state.db.clone())
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Service"))?;

    Ok(ok_with_message("Service updated", service))
}

pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    if !ServiceRepository::new(state.db.clone()).delete(id).await? {
        return Err(AppError::not_found("Service"));
    }

    tracing::info!(service_id = %id, "Service deleted");
    Ok(message("Service deleted"))
}

/// 公开：已启用的服务，按排序字段
pub async fn list_public_services(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let services = ServiceRepository::new(state.db.clone()).list(true).await?;
    Ok(ok(services))
}

/// 公开：按 slug 获取
pub async fn get_public_service(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let service = ServiceRepository::new(state.db.clone())
        .get_active_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Service"))?;

    Ok(ok(service))
}
