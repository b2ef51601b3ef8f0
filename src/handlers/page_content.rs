//! 页面内容区块的后台 CRUD 与公开读取

use super::{created, message, ok, ok_with_message, parse_query, path_id, validated_body};
use crate::{
    error::AppError,
    middleware::AppState,
    models::page_content::{CreatePageContentRequest, PageQuery, UpdatePageContentRequest},
    repository::PageContentRepository,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

fn page_filter(query: &PageQuery) -> Option<&str> {
    query.page.as_deref().map(str::trim).filter(|p| !p.is_empty())
}

/// 后台列表，可按 `?page=` 过滤
pub async fn list_sections(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let query = parse_query(query)?;
    let sections = PageContentRepository::new(state.db.clone())
        .list(page_filter(&query), false)
        .await?;
    Ok(ok(sections))
}

pub async fn get_section(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    let section = PageContentRepository::new(state.db.clone())
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Page content"))?;

    Ok(ok(section))
}

pub async fn create_section(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreatePageContentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = validated_body(payload)?;
    let section = PageContentRepository::new(state.db.clone())
        .create(&req)
        .await?;

    tracing::info!(page = %section.page, section = %section.section, "Page content created");
    Ok(created("Page content created", section))
}

pub async fn update_section(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdatePageContentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    let req = validated_body(payload)?;

    let section = PageContentRepository::new(state.db.clone())
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Page content"))?;

    Ok(ok_with_message("Page content updated", section))
}

pub async fn delete_section(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    if !PageContentRepository::new(state.db.clone()).delete(id).await? {
        return Err(AppError::not_found("Page content"));
    }

    Ok(message("Page content deleted"))
}

/// 公开：某页面已启用的区块
pub async fn list_public_sections(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let query = parse_query(query)?;
    let sections = PageContentRepository::new(state.db.clone())
        .list(page_filter(&query), true)
        .await?;
    Ok(ok(sections))
}
