//! Admin gate
//!
//! Every admin route runs behind [`require_admin`]. The token is read from
//! the `admin_token` cookie, falling back to `Authorization: Bearer`.

use crate::{
    error::AppError,
    middleware::AppState,
    models::auth::AdminIdentity,
    repository::AdminRepository,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Session cookie name
pub const SESSION_COOKIE: &str = "admin_token";

// handler 中直接提取注入的身份
impl<S> FromRequestParts<S> for AdminIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminIdentity>()
            .copied()
            .ok_or(AppError::Unauthorized)
    }
}

/// Pull the session token from the cookie, then the bearer header
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// 管理员鉴权中间件，失败时直接返回 401，不会进入后续 handler
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers()).ok_or_else(|| {
        tracing::debug!("Admin gate: no session token");
        AppError::Unauthorized
    })?;

    let claims = state.jwt_service.validate(&token)?;
    let admin_id = claims.admin_id()?;

    let admin = AdminRepository::new(state.db.clone())
        .find_by_id(&admin_id)
        .await?
        .ok_or_else(|| {
            tracing::debug!(%admin_id, "Admin gate: admin no longer exists");
            AppError::Unauthorized
        })?;

    if !admin.is_active {
        tracing::debug!(%admin_id, "Admin gate: admin is inactive");
        return Err(AppError::Unauthorized);
    }

    req.extensions_mut().insert(AdminIdentity {
        id: admin_id,
        role: claims.role,
    });

    Ok(next.run(req).await)
}
