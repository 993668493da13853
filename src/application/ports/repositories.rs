//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::passage::{Language, Passage, PassageError, PassageId, Slug, Title};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Passage Repository
// ============================================================================

/// 文章实体（用于持久化，未经校验的行数据）
#[derive(Debug, Clone)]
pub struct PassageRecord {
    pub id: i64,
    pub title: String,
    pub slug: Option<String>,
    pub body: String,
    pub language_code: String,
    pub image_url: Option<String>,
    pub category_id: Option<i64>,
    pub clicks: i64,
}

/// 行数据 -> 聚合：在读取边界做校验，失败即报 Malformed
impl TryFrom<PassageRecord> for Passage {
    type Error = PassageError;

    fn try_from(record: PassageRecord) -> Result<Self, Self::Error> {
        let malformed = |e: PassageError| {
            PassageError::Malformed(format!("passage {}: {}", record.id, e))
        };

        let title = Title::new(record.title.clone()).map_err(malformed)?;
        let language = Language::from_code(&record.language_code).map_err(malformed)?;
        let slug = record
            .slug
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(Slug::new)
            .transpose()
            .map_err(malformed)?;
        let image_url = record.image_url.filter(|url| !url.is_empty());

        Ok(Passage::new(
            PassageId::new(record.id),
            title,
            record.body,
            language,
            slug,
            image_url,
        ))
    }
}

/// Passage Repository Port
#[async_trait]
pub trait PassageRepositoryPort: Send + Sync {
    /// 根据 ID 查找
    async fn find_by_id(&self, id: i64) -> Result<Option<PassageRecord>, RepositoryError>;

    /// 根据 slug 查找
    async fn find_by_slug(&self, slug: &str) -> Result<Option<PassageRecord>, RepositoryError>;

    /// 首页推荐文章
    async fn find_featured(&self, limit: usize) -> Result<Vec<PassageRecord>, RepositoryError>;

    /// 分类下的文章
    async fn find_by_category(&self, category_id: i64)
        -> Result<Vec<PassageRecord>, RepositoryError>;
}

// ============================================================================
// Category Repository
// ============================================================================

/// 分类实体
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i64>,
}

/// Category Repository Port
#[async_trait]
pub trait CategoryRepositoryPort: Send + Sync {
    /// 根据 slug 查找
    async fn find_by_slug(&self, slug: &str) -> Result<Option<CategoryRecord>, RepositoryError>;

    /// 获取子分类
    async fn find_children(&self, parent_id: i64) -> Result<Vec<CategoryRecord>, RepositoryError>;
}

// ============================================================================
// Dictionary Repository
// ============================================================================

/// 希伯来文词典 Port
#[async_trait]
pub trait DictionaryRepositoryPort: Send + Sync {
    /// 精确匹配查词
    async fn lookup(&self, word: &str) -> Result<Option<String>, RepositoryError>;
}
