//! Dashboard aggregate queries

use crate::{error::AppError, models::dashboard::DashboardStats};
use sqlx::PgPool;

pub struct DashboardRepository {
    db: PgPool,
}

impl DashboardRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 单条查询汇总所有计数
    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let stats = sqlx::query_as::<_, DashboardStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM services) AS services_total,
                (SELECT COUNT(*) FROM services WHERE is_active) AS services_active,
                (SELECT COUNT(*) FROM blogs) AS blogs_total,
                (SELECT COUNT(*) FROM blogs WHERE is_published) AS blogs_published,
                (SELECT COUNT(*) FROM page_contents) AS page_sections,
                (SELECT COUNT(*) FROM settings) AS settings,
                (SELECT COUNT(*) FROM admins) AS admins_total,
                (SELECT COUNT(*) FROM admins WHERE is_active) AS admins_active
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        Ok(stats)
    }
}
