//! 博客文章的后台 CRUD 与公开读取

use super::{created, message, ok, ok_with_message, parse_query, path_id, validated_body};
use crate::{
    error::AppError,
    middleware::AppState,
    models::{
        blog::{BlogListQuery, CreateBlogRequest, UpdateBlogRequest},
        clamp_page, ListQuery,
    },
    repository::BlogRepository,
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

/// 后台列表（含草稿）
pub async fn list_blogs(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let query = parse_query(query)?;
    let (limit, offset) = clamp_page(query.limit, query.offset);
    let blogs = BlogRepository::new(state.db.clone())
        .list_all(limit, offset)
        .await?;
    Ok(ok(blogs))
}

pub async fn get_blog(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    let blog = BlogRepository::new(state.db.clone())
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Blog"))?;

    Ok(ok(blog))
}

pub async fn create_blog(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateBlogRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = validated_body(payload)?;
    let blog = BlogRepository::new(state.db.clone()).create(&req).await?;

    tracing::info!(blog_id = %blog.id, slug = %blog.slug, published = blog.is_published, "Blog created");
    Ok(created("Blog created", blog))
}

pub async fn update_blog(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateBlogRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    let req = validated_body(payload)?;

    let blog = BlogRepository::new(state.db.clone())
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Blog"))?;

    Ok(ok_with_message("Blog updated", blog))
}

pub async fn delete_blog(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    if !BlogRepository::new(state.db.clone()).delete(id).await? {
        return Err(AppError::not_found("Blog"));
    }

    tracing::info!(blog_id = %id, "Blog deleted");
    Ok(message("Blog deleted"))
}

/// 公开：已发布文章，`?tag=&limit=&offset=`
pub async fn list_public_blogs(
    State(state): State<Arc<AppState>>,
    query: Result<Query<BlogListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let query = parse_query(query)?;
    let (limit, offset) = clamp_page(query.limit, query.offset);
    let tag = query.tag.as_deref().map(str::trim).filter(|t| !t.is_empty());

    let blogs = BlogRepository::new(state.db.clone())
        .list_published(tag, limit, offset)
        .await?;
    Ok(ok(blogs))
}

/// 公开：按 slug 获取，草稿视为不存在
pub async fn get_public_blog(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let blog = BlogRepository::new(state.db.clone())
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Blog"))?;

    Ok(ok(blog))
}
