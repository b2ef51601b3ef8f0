//! Site settings repository

use crate::{error::AppError, models::setting::*};
use sqlx::PgPool;
use uuid::Uuid;

const DUPLICATE_KEY: &str = "A setting with this key already exists";

pub struct SettingRepository {
    db: PgPool,
}

impl SettingRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Setting>, AppError> {
        let settings = sqlx::query_as::<_, Setting>(
            r#"
            SELECT * FROM settings
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY category ASC, key ASC
            "#,
        )
        .bind(category)
        .fetch_all(&self.db)
        .await?;

        Ok(settings)
    }

    /// 公开设置，供前台页面读取
    pub async fn list_public(&self) -> Result<Vec<Setting>, AppError> {
        let settings = sqlx::query_as::<_, Setting>(
            "SELECT * FROM settings WHERE is_public ORDER BY key ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(settings)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Setting>, AppError> {
        let setting = sqlx::query_as::<_, Setting>("SELECT * FROM settings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(setting)
    }

    pub async fn create(&self, req: &CreateSettingRequest) -> Result<Setting, AppError> {
        sqlx::query_as::<_, Setting>(
            r#"
            INSERT INTO settings (key, value, category, description, is_public)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&req.key)
        .bind(&req.value)
        .bind(&req.category)
        .bind(&req.description)
        .bind(req.is_public)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_KEY))
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateSettingRequest,
    ) -> Result<Option<Setting>, AppError> {
        sqlx::query_as::<_, Setting>(
            r#"
            UPDATE settings
            SET
                key = COALESCE($2, key),
                value = COALESCE($3, value),
                category = COALESCE($4, category),
                description = CASE WHEN $7 THEN $5 ELSE description END,
                is_public = COALESCE($6, is_public),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.key)
        .bind(&req.value)
        .bind(&req.category)
        .bind(req.description.as_ref().and_then(|v| v.as_deref()))
        .bind(req.is_public)
        .bind(req.description.is_some())
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_KEY))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM settings WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
