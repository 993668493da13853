//! Audio Cache Port - 代理音频缓存
//!
//! 定义代理音频缓存的抽象接口，具体实现使用 Sled (LRU + 过期时间)

use async_trait::async_trait;
use thiserror::Error;

/// Audio Cache 错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache full, eviction failed")]
    EvictionFailed,

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// 缓存元数据
#[derive(Debug, Clone)]
pub struct CacheMetadata {
    pub text_hash: String,
    pub language: String,
    pub content_type: String,
}

/// 缓存命中的音频
#[derive(Debug, Clone)]
pub struct CachedAudio {
    pub audio_data: Vec<u8>,
    pub content_type: String,
}

/// Audio Cache Port
///
/// - 缓存 key: md5(text) + language
/// - 超过 max_age 的条目视为未命中
#[async_trait]
pub trait AudioCachePort: Send + Sync {
    /// 存储音频数据
    ///
    /// 自动执行 LRU 淘汰以保持缓存大小在限制内
    async fn put(
        &self,
        cache_key: &str,
        audio_data: Vec<u8>,
        metadata: CacheMetadata,
    ) -> Result<(), CacheError>;

    /// 获取音频数据，同时更新 last_accessed (LRU touch)
    async fn get(&self, cache_key: &str) -> Result<Option<CachedAudio>, CacheError>;

    /// 删除缓存条目
    async fn remove(&self, cache_key: &str) -> Result<(), CacheError>;

    /// 获取缓存统计信息
    async fn stats(&self) -> CacheStats;
}

/// 缓存统计信息
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_size_bytes: u64,
    pub max_size_bytes: u64,
    pub hit_count: u64,
    pub miss_count: u64,
}

/// 生成缓存 key
pub fn generate_cache_key(text: &str, language: &str) -> String {
    let digest = md5::compute(text.as_bytes());
    format!("{:x}:{}", digest, language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_depends_on_text_and_language() {
        let a = generate_cache_key("שלום", "he");
        assert_eq!(a, generate_cache_key("שלום", "he"));
        assert_ne!(a, generate_cache_key("שלום", "en"));
        assert_ne!(a, generate_cache_key("עולם", "he"));
        assert!(a.ends_with(":he"));
    }
}
