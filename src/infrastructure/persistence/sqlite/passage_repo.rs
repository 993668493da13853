//! SQLite Passage Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{PassageRecord, PassageRepositoryPort, RepositoryError};

const PASSAGE_COLUMNS: &str =
    "id, title, slug, body, language_code, image_url, category_id, clicks";

/// SQLite Passage Repository
pub struct SqlitePassageRepository {
    pool: DbPool,
}

impl SqlitePassageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 写入一篇文章（按 id upsert），仅用于测试数据
    #[cfg(test)]
    pub async fn save(&self, passage: &PassageRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO passages (id, title, slug, body, language_code, image_url, category_id, clicks)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                slug = excluded.slug,
                body = excluded.body,
                language_code = excluded.language_code,
                image_url = excluded.image_url,
                category_id = excluded.category_id,
                clicks = excluded.clicks
            "#,
        )
        .bind(passage.id)
        .bind(&passage.title)
        .bind(&passage.slug)
        .bind(&passage.body)
        .bind(&passage.language_code)
        .bind(&passage.image_url)
        .bind(passage.category_id)
        .bind(passage.clicks)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[derive(FromRow)]
struct PassageRow {
    id: i64,
    title: String,
    slug: Option<String>,
    body: String,
    language_code: String,
    image_url: Option<String>,
    category_id: Option<i64>,
    clicks: i64,
}

impl From<PassageRow> for PassageRecord {
    fn from(row: PassageRow) -> Self {
        PassageRecord {
            id: row.id,
            title: row.title,
            slug: row.slug,
            body: row.body,
            language_code: row.language_code,
            image_url: row.image_url,
            category_id: row.category_id,
            clicks: row.clicks,
        }
    }
}

#[async_trait]
impl PassageRepositoryPort for SqlitePassageRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<PassageRecord>, RepositoryError> {
        let row: Option<PassageRow> =
            sqlx::query_as(&format!("SELECT {} FROM passages WHERE id = ?", PASSAGE_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(PassageRecord::from))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PassageRecord>, RepositoryError> {
        let row: Option<PassageRow> =
            sqlx::query_as(&format!("SELECT {} FROM passages WHERE slug = ?", PASSAGE_COLUMNS))
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(PassageRecord::from))
    }

    async fn find_featured(&self, limit: usize) -> Result<Vec<PassageRecord>, RepositoryError> {
        let rows: Vec<PassageRow> = sqlx::query_as(&format!(
            "SELECT {} FROM passages ORDER BY id LIMIT ?",
            PASSAGE_COLUMNS
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(PassageRecord::from).collect())
    }

    async fn find_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<PassageRecord>, RepositoryError> {
        let rows: Vec<PassageRow> = sqlx::query_as(&format!(
            "SELECT {} FROM passages WHERE category_id = ? ORDER BY id",
            PASSAGE_COLUMNS
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(PassageRecord::from).collect())
    }
}
