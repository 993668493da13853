//! Passage Queries - 文章与分类查询

use serde::Serialize;

use crate::application::ports::{CategoryRecord, PassageRecord};

/// 首页推荐数量
pub const FEATURED_LIMIT: usize = 6;

/// 根据 slug 获取文章
#[derive(Debug, Clone)]
pub struct GetPassageBySlug {
    pub slug: String,
}

/// 根据 ID 获取文章
#[derive(Debug, Clone)]
pub struct GetPassageById {
    pub id: i64,
}

/// 获取首页推荐文章
#[derive(Debug, Clone)]
pub struct ListFeaturedPassages {
    pub limit: usize,
}

impl Default for ListFeaturedPassages {
    fn default() -> Self {
        Self {
            limit: FEATURED_LIMIT,
        }
    }
}

/// 获取分类内容
#[derive(Debug, Clone)]
pub struct ListCategory {
    pub slug: String,
}

/// 文章摘要
#[derive(Debug, Clone, Serialize)]
pub struct PassageSummary {
    pub id: i64,
    pub title: String,
    pub slug: Option<String>,
    pub language: String,
    pub image_url: Option<String>,
}

impl From<PassageRecord> for PassageSummary {
    fn from(record: PassageRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            slug: record.slug.filter(|s| !s.is_empty()),
            language: record.language_code,
            image_url: record.image_url.filter(|url| !url.is_empty()),
        }
    }
}

/// 分类页条目：子分类或文章
#[derive(Debug, Clone, Serialize)]
pub struct CategoryEntry {
    pub id: i64,
    pub title: String,
    pub slug: Option<String>,
    pub image_url: Option<String>,
    pub is_passage: bool,
}

impl From<CategoryRecord> for CategoryEntry {
    fn from(category: CategoryRecord) -> Self {
        Self {
            id: category.id,
            title: category.name,
            slug: Some(category.slug),
            image_url: None,
            is_passage: false,
        }
    }
}

impl From<PassageRecord> for CategoryEntry {
    fn from(record: PassageRecord) -> Self {
        let summary = PassageSummary::from(record);
        Self {
            id: summary.id,
            title: summary.title,
            slug: summary.slug,
            image_url: summary.image_url,
            is_passage: true,
        }
    }
}

/// 分类内容：子分类在前，文章在后
#[derive(Debug, Clone, Serialize)]
pub struct CategoryListing {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub entries: Vec<CategoryEntry>,
}
