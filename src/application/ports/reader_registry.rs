//! Reader Registry Port - 阅读会话生命周期管理
//!
//! 每个打开的阅读页面对应一个阅读会话（持有一个同步器），
//! 具体实现在 infrastructure/memory 层

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::application::synchronizer::ReaderHandle;

/// Reader Registry 错误
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("Reader not found: {0}")]
    NotFound(String),

    #[error("Reader already exists: {0}")]
    AlreadyExists(String),
}

/// 已注册的阅读会话
#[derive(Debug, Clone)]
pub struct ReaderEntry {
    pub handle: ReaderHandle,
    pub passage_id: i64,
    pub opened_at: DateTime<Utc>,
}

impl ReaderEntry {
    pub fn new(handle: ReaderHandle, passage_id: i64) -> Self {
        Self {
            handle,
            passage_id,
            opened_at: Utc::now(),
        }
    }

    pub fn reader_id(&self) -> &str {
        self.handle.reader_id()
    }
}

/// Reader Registry Port
pub trait ReaderRegistryPort: Send + Sync {
    /// 注册阅读会话
    fn register(&self, entry: ReaderEntry) -> Result<String, ReaderError>;

    /// 获取阅读会话
    fn get(&self, reader_id: &str) -> Result<ReaderEntry, ReaderError>;

    /// 注销阅读会话
    fn unregister(&self, reader_id: &str) -> Result<ReaderEntry, ReaderError>;

    /// 所有阅读会话 ID
    fn list_all(&self) -> Vec<String>;
}
