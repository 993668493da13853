//! SQLite Category Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{CategoryRecord, CategoryRepositoryPort, RepositoryError};

/// SQLite Category Repository
pub struct SqliteCategoryRepository {
    pool: DbPool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 写入分类（按 id upsert），仅用于测试数据
    #[cfg(test)]
    pub async fn save(&self, category: &CategoryRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, slug, parent_id)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                slug = excluded.slug,
                parent_id = excluded.parent_id
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.parent_id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[derive(FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    slug: String,
    parent_id: Option<i64>,
}

impl From<CategoryRow> for CategoryRecord {
    fn from(row: CategoryRow) -> Self {
        CategoryRecord {
            id: row.id,
            name: row.name,
            slug: row.slug,
            parent_id: row.parent_id,
        }
    }
}

#[async_trait]
impl CategoryRepositoryPort for SqliteCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<CategoryRecord>, RepositoryError> {
        let row: Option<CategoryRow> =
            sqlx::query_as("SELECT id, name, slug, parent_id FROM categories WHERE slug = ?")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(CategoryRecord::from))
    }

    async fn find_children(&self, parent_id: i64) -> Result<Vec<CategoryRecord>, RepositoryError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            "SELECT id, name, slug, parent_id FROM categories WHERE parent_id = ? ORDER BY id",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(CategoryRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    #[tokio::test]
    async fn test_category_tree() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let repo = SqliteCategoryRepository::new(pool);

        let root = CategoryRecord {
            id: 1,
            name: "Hebreo".to_string(),
            slug: "he".to_string(),
            parent_id: None,
        };
        let child = CategoryRecord {
            id: 2,
            name: "Biblia".to_string(),
            slug: "biblia".to_string(),
            parent_id: Some(1),
        };
        repo.save(&root).await.unwrap();
        repo.save(&child).await.unwrap();

        let found = repo.find_by_slug("he").await.unwrap().unwrap();
        assert_eq!(found.name, "Hebreo");
        assert!(found.parent_id.is_none());

        let children = repo.find_children(1).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].slug, "biblia");
        assert!(repo.find_children(2).await.unwrap().is_empty());
        assert!(repo.find_by_slug("xx").await.unwrap().is_none());
    }
}
