//! SQLite Dictionary Repository

use async_trait::async_trait;

use super::DbPool;
use crate::application::ports::{DictionaryRepositoryPort, RepositoryError};

/// SQLite 希伯来文词典
pub struct SqliteDictionaryRepository {
    pool: DbPool,
}

impl SqliteDictionaryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 写入词条，仅用于测试数据
    #[cfg(test)]
    pub async fn save(&self, word: &str, translation: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO hebrew_dictionary (word, translation)
            VALUES (?, ?)
            ON CONFLICT(word) DO UPDATE SET translation = excluded.translation
            "#,
        )
        .bind(word)
        .bind(translation)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl DictionaryRepositoryPort for SqliteDictionaryRepository {
    async fn lookup(&self, word: &str) -> Result<Option<String>, RepositoryError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT translation FROM hebrew_dictionary WHERE word = ?")
                .bind(word)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(|(translation,)| translation))
    }
}
