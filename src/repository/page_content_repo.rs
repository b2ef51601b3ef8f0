//! Page content repository

use crate::{error::AppError, models::page_content::*};
use sqlx::PgPool;
use uuid::Uuid;

const DUPLICATE_SECTION: &str = "This page already has a section with that name";

pub struct PageContentRepository {
    db: PgPool,
}

impl PageContentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        page: Option<&str>,
        active_only: bool,
    ) -> Result<Vec<PageContent>, AppError> {
        let sections = sqlx::query_as::<_, PageContent>(
            r#"
            SELECT * FROM page_contents
            WHERE ($1::text IS NULL OR page = $1)
              AND ($2 = FALSE OR is_active)
            ORDER BY page ASC, sort_order ASC, section ASC
            "#,
        )
        .bind(page)
        .bind(active_only)
        .fetch_all(&self.db)
        .await?;

        Ok(sections)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<PageContent>, AppError> {
        let section = sqlx::query_as::<_, PageContent>("SELECT * FROM page_contents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(section)
    }

    pub async fn create(&self, req: &CreatePageContentRequest) -> Result<PageContent, AppError> {
        sqlx::query_as::<_, PageContent>(
            r#"
            INSERT INTO page_contents
                (page, section, title, subtitle, body, image_url, sort_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&req.page)
        .bind(&req.section)
        .bind(&req.title)
        .bind(&req.subtitle)
        .bind(&req.body)
        .bind(&req.image_url)
        .bind(req.sort_order)
        .bind(req.is_active)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_SECTION))
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdatePageContentRequest,
    ) -> Result<Option<PageContent>, AppError> {
        sqlx::query_as::<_, PageContent>(
            r#"
            UPDATE page_contents
            SET
                page = COALESCE($2, page),
                section = COALESCE($3, section),
                title = CASE WHEN $10 THEN $4 ELSE title END,
                subtitle = CASE WHEN $11 THEN $5 ELSE subtitle END,
                body = CASE WHEN $12 THEN $6 ELSE body END,
                image_url = CASE WHEN $13 THEN $7 ELSE image_url END,
                sort_order = COALESCE($8, sort_order),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.page)
        .bind(&req.section)
        .bind(req.title.as_ref().and_then(|v| v.as_deref()))
        .bind(req.subtitle.as_ref().and_then(|v| v.as_deref()))
        .bind(req.body.as_ref().and_then(|v| v.as_deref()))
        .bind(req.image_url.as_ref().and_then(|v| v.as_deref()))
        .bind(req.sort_order)
        .bind(req.is_active)
        .bind(req.title.is_some())
        .bind(req.subtitle.is_some())
        .bind(req.body.is_some())
        .bind(req.image_url.is_some())
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_SECTION))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM page_contents WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
