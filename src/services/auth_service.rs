//! 认证服务：登录、修改密码

use crate::{
    auth::{jwt::JwtService, password::PasswordHasher},
    config::SecurityConfig,
    error::AppError,
    models::{
        admin::{AdminProfile, AdminRole, ChangePasswordRequest},
        auth::{AdminIdentity, LoginRequest, LoginResponse},
    },
    repository::AdminRepository,
};
use once_cell::sync::Lazy;
use sqlx::PgPool;
use std::sync::Arc;

/// 未知邮箱与密码错误共用同一条消息
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// 仅在密码正确后才会返回，不能用来探测账号是否存在
pub const ACCOUNT_DISABLED: &str = "This account has been deactivated";

// 邮箱不存在时也跑一次哈希校验，使两种失败耗时接近
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| PasswordHasher::new().hash("timing-equalizer-password").ok());

pub struct AuthService {
    db: PgPool,
    jwt_service: Arc<JwtService>,
    security: SecurityConfig,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_service: Arc<JwtService>, security: SecurityConfig) -> Self {
        Self {
            db,
            jwt_service,
            security,
        }
    }

    /// 管理员登录
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let (email, password) = required_credentials(&req)?;

        let repo = AdminRepository::new(self.db.clone());
        let hasher = PasswordHasher::new();

        let Some(admin) = repo.find_by_email(email).await? else {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = hasher.verify(password, dummy);
            }
            tracing::info!(email = %email, "Login failed: unknown email");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !hasher.verify(password, &admin.password_hash)? {
            tracing::info!(admin_id = %admin.id, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        if !admin.is_active {
            tracing::info!(admin_id = %admin.id, "Login refused: account inactive");
            return Err(AppError::authentication(ACCOUNT_DISABLED));
        }

        let role = AdminRole::parse(&admin.role).ok_or_else(|| {
            AppError::Internal(format!("Admin {} has unknown role {}", admin.id, admin.role))
        })?;

        let token = self.jwt_service.issue(&admin.id, role)?;

        let admin = repo
            .touch_last_login(admin.id)
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_CREDENTIALS))?;

        tracing::info!(admin_id = %admin.id, role = %role, "Admin logged in");

        Ok(LoginResponse {
            token,
            expires_in: self.jwt_service.token_ttl_secs(),
            admin: AdminProfile::from(admin),
        })
    }

    /// 修改当前管理员密码
    pub async fn change_password(
        &self,
        identity: &AdminIdentity,
        req: &ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let repo = AdminRepository::new(self.db.clone());
        let admin = repo
            .find_by_id(&identity.id)
            .await?
            .ok_or_else(|| AppError::not_found("Admin"))?;

        let hasher = PasswordHasher::new();
        if !hasher.verify(&req.current_password, &admin.password_hash)? {
            return Err(AppError::Validation("Current password is incorrect".to_string()));
        }

        PasswordHasher::validate_password_policy(&req.new_password, &self.security)?;

        let new_hash = hasher.hash(&req.new_password)?;
        repo.update_password(admin.id, &new_hash).await?;

        tracing::info!(admin_id = %admin.id, "Admin password changed");
        Ok(())
    }
}

/// 邮箱、密码都必须提供且非空
fn required_credentials(req: &LoginRequest) -> Result<(&str, &str), AppError> {
    let email = req.email.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let password = req.password.as_deref().filter(|s| !s.is_empty());

    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(AppError::Validation("Email and password are required".to_string())),
    }
}
