//! Admin repository (数据库访问层)

use crate::{error::AppError, models::admin::*};
use sqlx::{PgPool, Row};
use uuid::Uuid;

const DUPLICATE_ADMIN: &str = "An admin with this email or username already exists";

pub struct AdminRepository {
    db: PgPool,
}

impl AdminRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 根据邮箱查找管理员（不区分大小写）
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE lower(email) = lower($1)")
            .bind(email.trim())
            .fetch_optional(&self.db)
            .await?;

        Ok(admin)
    }

    /// 根据 ID 查找管理员
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(admin)
    }

    /// 邮箱或用户名是否已被占用（可排除自身）
    pub async fn identity_taken(
        &self,
        email: Option<&str>,
        username: Option<&str>,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let taken: bool = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM admins
                WHERE (lower(email) = lower($1) OR lower(username) = lower($2))
                  AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(email)
        .bind(username)
        .bind(exclude_id)
        .fetch_one(&self.db)
        .await?
        .get(0);

        Ok(taken)
    }

    /// 创建管理员
    pub async fn create(
        &self,
        req: &CreateAdminRequest,
        password_hash: &str,
    ) -> Result<Admin, AppError> {
        let role = req.role.unwrap_or(AdminRole::Admin);

        sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (username, email, password_hash, display_name, role, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(req.username.trim())
        .bind(req.email.trim())
        .bind(password_hash)
        .bind(&req.display_name)
        .bind(role.as_str())
        .bind(req.is_active.unwrap_or(true))
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_ADMIN))
    }

    /// 更新资料
    pub async fn update_profile(
        &self,
        id: Uuid,
        req: &UpdateProfileRequest,
    ) -> Result<Option<Admin>, AppError> {
        sqlx::query_as::<_, Admin>(
            r#"
            UPDATE admins
            SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                display_name = COALESCE($4, display_name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.username.as_deref().map(str::trim))
        .bind(req.email.as_deref().map(str::trim))
        .bind(&req.display_name)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_ADMIN))
    }

    /// 更新密码
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE admins SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 记录最后登录时间
    pub async fn touch_last_login(&self, id: Uuid) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, Admin>(
            "UPDATE admins SET last_login_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(admin)
    }

    /// 启用 / 停用
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE admins SET is_active = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(is_active)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 列出管理员
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Admin>, AppError> {
        let admins = sqlx::query_as::<_, Admin>(
            "SELECT * FROM admins ORDER BY created_at ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(admins)
    }
}
