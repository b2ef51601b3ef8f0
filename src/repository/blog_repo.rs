//! Blog repository

use crate::{error::AppError, models::blog::*};
use sqlx::PgPool;
use uuid::Uuid;

const DUPLICATE_SLUG: &str = "A blog post with this slug already exists";

pub struct BlogRepository {
    db: PgPool,
}

impl BlogRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 后台列表：包含草稿
    pub async fn list_all(&self, limit: i64, offset: i64) -> Result<Vec<Blog>, AppError> {
        let blogs = sqlx::query_as::<_, Blog>(
            "SELECT * FROM blogs ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(blogs)
    }

    /// 公开列表：仅已发布，可按标签过滤
    pub async fn list_published(
        &self,
        tag: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Blog>, AppError> {
        let blogs = sqlx::query_as::<_, Blog>(
            r#"
            SELECT * FROM blogs
            WHERE is_published
              AND ($1::text IS NULL OR $1 = ANY(tags))
            ORDER BY published_at DESC NULLS LAST, created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tag)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(blogs)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Blog>, AppError> {
        let blog = sqlx::query_as::<_, Blog>("SELECT * FROM blogs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(blog)
    }

    pub async fn get_published_by_slug(&self, slug: &str) -> Result<Option<Blog>, AppError> {
        let blog = sqlx::query_as::<_, Blog>(
            "SELECT * FROM blogs WHERE slug = $1 AND is_published",
        )
        .bind(slug)
        .fetch_optional(&self.db)
        .await?;

        Ok(blog)
    }

    pub async fn create(&self, req: &CreateBlogRequest) -> Result<Blog, AppError> {
        sqlx::query_as::<_, Blog>(
            r#"
            INSERT INTO blogs
                (title, slug, excerpt, content, cover_image, author, tags, is_published, published_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, CASE WHEN $8 THEN NOW() ELSE NULL END)
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.slug)
        .bind(&req.excerpt)
        .bind(&req.content)
        .bind(&req.cover_image)
        .bind(&req.author)
        .bind(&req.tags)
        .bind(req.is_published)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_SLUG))
    }

    /// 首次发布时写入 published_at，之后保持不变
    pub async fn update(&self, id: Uuid, req: &UpdateBlogRequest) -> Result<Option<Blog>, AppError> {
        sqlx::query_as::<_, Blog>(
            r#"
            UPDATE blogs
            SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                excerpt = CASE WHEN $10 THEN $4 ELSE excerpt END,
                content = COALESCE($5, content),
                cover_image = CASE WHEN $11 THEN $6 ELSE cover_image END,
                author = CASE WHEN $12 THEN $7 ELSE author END,
                tags = COALESCE($8, tags),
                is_published = COALESCE($9, is_published),
                published_at = CASE
                    WHEN COALESCE($9, is_published) AND published_at IS NULL THEN NOW()
                    ELSE published_at
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.slug)
        .bind(req.excerpt.as_ref().and_then(|v| v.as_deref()))
        .bind(&req.content)
        .bind(req.cover_image.as_ref().and_then(|v| v.as_deref()))
        .bind(req.author.as_ref().and_then(|v| v.as_deref()))
        .bind(&req.tags)
        .bind(req.is_published)
        .bind(req.excerpt.is_some())
        .bind(req.cover_image.is_some())
        .bind(req.author.is_some())
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, DUPLICATE_SLUG))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
