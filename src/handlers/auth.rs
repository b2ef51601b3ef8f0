//! 认证相关的 HTTP 处理器

use super::{message, ok, ok_with_message, parse_body, validated_body};
use crate::{
    auth::cookie::{cleared_session_cookie, session_cookie},
    error::AppError,
    middleware::AppState,
    models::{
        admin::{AdminProfile, ChangePasswordRequest, UpdateProfileRequest},
        auth::{AdminIdentity, LoginRequest},
    },
    repository::AdminRepository,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// 登录：签发令牌并写入 admin_token cookie
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = parse_body(payload)?;
    let response = state.auth_service.login(req).await?;

    let cookie = session_cookie(
        response.token.clone(),
        response.expires_in,
        state.config.security.cookie_secure,
    );

    Ok((jar.add(cookie), ok_with_message("Login successful", response)))
}

/// 登出：仅清除客户端 cookie，令牌本身自然过期
pub async fn logout(
    State(state): State<Arc<AppState>>,
    identity: AdminIdentity,
    jar: CookieJar,
) -> impl IntoResponse {
    tracing::info!(admin_id = %identity.id, "Admin logged out");

    let jar = jar.add(cleared_session_cookie(state.config.security.cookie_secure));
    (jar, message("Logged out successfully"))
}

/// 当前登录的管理员
pub async fn me(
    State(state): State<Arc<AppState>>,
    identity: AdminIdentity,
) -> Result<impl IntoResponse, AppError> {
    let admin = AdminRepository::new(state.db.clone())
        .find_by_id(&identity.id)
        .await?
        .ok_or_else(|| AppError::not_found("Admin"))?;

    Ok(ok(AdminProfile::from(admin)))
}

/// 更新自己的资料
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    identity: AdminIdentity,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = validated_body(payload)?;
    let repo = AdminRepository::new(state.db.clone());

    if (req.email.is_some() || req.username.is_some())
        && repo
            .identity_taken(
                req.email.as_deref().map(str::trim),
                req.username.as_deref().map(str::trim),
                Some(identity.id),
            )
            .await?
    {
        return Err(AppError::Conflict(
            "An admin with this email or username already exists".to_string(),
        ));
    }

    let admin = repo
        .update_profile(identity.id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Admin"))?;

    tracing::info!(admin_id = %admin.id, "Admin profile updated");
    Ok(ok_with_message("Profile updated", AdminProfile::from(admin)))
}

/// 修改自己的密码
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    identity: AdminIdentity,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = parse_body(payload)?;
    state.auth_service.change_password(&identity, &req).await?;

    Ok(message("Password changed successfully"))
}
