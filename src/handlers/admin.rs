//! 管理员账号管理的 HTTP 处理器

use super::{created, message, ok, parse_body, parse_query, path_id, validated_body};
use crate::{
    auth::password::PasswordHasher,
    error::AppError,
    middleware::AppState,
    models::{
        admin::{AdminProfile, CreateAdminRequest, UpdateAdminStatusRequest},
        auth::AdminIdentity,
        clamp_page, ListQuery,
    },
    repository::AdminRepository,
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

/// 列出管理员
pub async fn list_admins(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let query = parse_query(query)?;
    let (limit, offset) = clamp_page(query.limit, query.offset);

    let admins = AdminRepository::new(state.db.clone())
        .list(limit, offset)
        .await?;

    let profiles: Vec<AdminProfile> = admins.into_iter().map(AdminProfile::from).collect();
    Ok(ok(profiles))
}

/// 创建管理员；邮箱或用户名重复返回 409
pub async fn create_admin(
    State(state): State<Arc<AppState>>,
    identity: AdminIdentity,
    payload: Result<Json<CreateAdminRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = validated_body(payload)?;

    PasswordHasher::validate_password_policy(&req.password, &state.config.security)?;

    let repo = AdminRepository::new(state.db.clone());
    if repo
        .identity_taken(Some(req.email.trim()), Some(req.username.trim()), None)
        .await?
    {
        return Err(AppError::Conflict(
            "An admin with this email or username already exists".to_string(),
        ));
    }

    let password_hash = PasswordHasher::new().hash(&req.password)?;
    let admin = repo.create(&req, &password_hash).await?;

    tracing::info!(admin_id = %admin.id, created_by = %identity.id, role = %admin.role, "Admin created");
    Ok(created("Admin created", AdminProfile::from(admin)))
}

/// 启用或停用其他管理员；停用后其令牌在下一次请求即失效
pub async fn update_admin_status(
    State(state): State<Arc<AppState>>,
    identity: AdminIdentity,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateAdminStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(path)?;
    let req = parse_body(payload)?;

    if id == identity.id && !req.is_active {
        return Err(AppError::BadRequest(
            "You cannot deactivate your own account".to_string(),
        ));
    }

    let updated = AdminRepository::new(state.db.clone())
        .set_active(id, req.is_active)
        .await?;
    if !updated {
        return Err(AppError::not_found("Admin"));
    }

    tracing::info!(admin_id = %id, is_active = req.is_active, changed_by = %identity.id, "Admin status changed");
    Ok(message(if req.is_active {
        "Admin activated"
    } else {
        "Admin deactivated"
    }))
}
