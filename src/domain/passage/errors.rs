//! Passage Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PassageError {
    #[error("文章不存在: {0}")]
    NotFound(String),

    #[error("无效的标题: {0}")]
    InvalidTitle(String),

    #[error("无效的 slug: {0}")]
    InvalidSlug(String),

    #[error("无效的语言代码: {0:?}")]
    InvalidLanguage(String),

    #[error("文章数据格式错误: {0}")]
    Malformed(String),
}
