//! 站点设置的后台 CRUD 与公开读取

use super::{created, message, ok, ok_with_message, parse_query, path_id, validated_body};
use crate::{
    error::AppError,
    middleware::AppState,
    models::setting::{CreateSettingRequest, Setting, SettingQuery, UpdateSettingRequest},
    repository::SettingRepository,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// 后台列表，可按 `?category=` 过滤
pub async fn list_settings(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SettingQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let query = parse_query(query)?;
    let category = query.category.as_deref().map(str::trim).filter(|c| !c.is_empty());
    let settings = SettingRepository::new(state.db.clone())
        .list(category)
        .await?;
    Ok(ok(settings))
}

pub async fn get_setting(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    let setting = SettingRepository::new(state.db.clone())
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Setting"))?;

    Ok(ok(setting))
}

pub async fn create_setting(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateSettingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = validated_body(payload)?;
    let setting = SettingRepository::new(state.db.clone()).create(&req).await?;

    tracing::info!(key = %setting.key, "Setting created");
    Ok(created("Setting created", setting))
}

pub async fn update_setting(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateSettingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    let req = validated_body(payload)?;

    let setting = SettingRepository::new(state.db.clone())
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Setting"))?;

    Ok(ok_with_message("Setting updated", setting))
}

pub async fn delete_setting(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    if !SettingRepository::new(state.db.clone()).delete(id).await? {
        return Err(AppError::not_found("Setting"));
    }

    Ok(message("Setting deleted"))
}

/// 公开设置折叠为 `{key: value}`
pub fn public_settings_map(settings: Vec<Setting>) -> BTreeMap<String, String> {
    settings
        .into_iter()
        .filter(|s| s.is_public)
        .map(|s| (s.key, s.value))
        .collect()
}

/// 公开：所有 is_public 设置
pub async fn list_public_settings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let settings = SettingRepository::new(state.db.clone()).list_public().await?;
    Ok(ok(public_settings_map(settings)))
}
