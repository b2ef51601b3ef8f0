//! Service repository

use crate::{error::AppError, models::service::*};
use sqlx::PgPool;
use uuid::Uuid;

const DUPLICATE_SLUG: &str = "A service with this slug already exists";

pub struct ServiceRepository {
    db: PgPool,
}

impl ServiceRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出服务；`active_only` 供公开接口使用
    pub async fn list(&self, active_only: bool) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT * FROM services
            WHERE ($1 = FALSE OR is_active)
            ORDER BY sort_order ASC, created_at ASC
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;

        Ok(services)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(service)
    }

    /// 按 slug 获取已启用的服务
    pub async fn get_active_by_slug(&self, slug: &str) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE slug = $1 AND is_active",
        )
        .bind(slug)
        .fetch_optional(&self.db)
        .await?;

        Ok(service)
    }

    pub async fn create(&self, req: &CreateServiceRequest) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services
                (title, slug, summary, description, icon, image_url, features, sort_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.slug)
        .bind(&req.summary)
        .bind(&req.description)
        .bind(&req.icon)
        .bind(&req.image_url)
        .bind(&req.features)
        .bind(req.sort_order)
        .bind(req.is_active)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_SLUG))
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateServiceRequest,
    ) -> Result<Option<Service>, AppError> {
        sqlx::query_as::<_, Service>(
            r#"
            UPDATE services
            SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                summary = CASE WHEN $11 THEN $4 ELSE summary END,
                description = CASE WHEN $12 THEN $5 ELSE description END,
                icon = CASE WHEN $13 THEN $6 ELSE icon END,
                image_url = CASE WHEN $14 THEN $7 ELSE image_url END,
                features = COALESCE($8, features),
                sort_order = COALESCE($9, sort_order),
                is_active = COALESCE($10, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.slug)
        .bind(req.summary.as_ref().and_then(|v| v.as_deref()))
        .bind(req.description.as_ref().and_then(|v| v.as_deref()))
        .bind(req.icon.as_ref().and_then(|v| v.as_deref()))
        .bind(req.image_url.as_ref().and_then(|v| v.as_deref()))
        .bind(&req.features)
        .bind(req.sort_order)
        .bind(req.is_active)
        .bind(req.summary.is_some())
        .bind(req.description.is_some())
        .bind(req.icon.is_some())
        .bind(req.image_url.is_some())
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_SLUG))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
