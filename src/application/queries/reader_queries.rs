//! Reader Queries - 阅读会话状态

/// 获取阅读会话当前高亮
#[derive(Debug, Clone)]
pub struct GetReaderHighlight {
    pub reader_id: String,
}
