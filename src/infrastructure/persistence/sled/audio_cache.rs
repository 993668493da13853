//! Sled-based LRU Audio Cache Implementation
//!
//! 代理音频按 `md5(text):lang` 缓存；超过 max_age 的条目视为未命中并被删除，
//! 总大小超过上限时按 last_accessed 淘汰最久未使用的条目。

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sled::Db;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::application::ports::{
    AudioCachePort, CacheError, CacheMetadata, CacheStats, CachedAudio,
};

const ENTRY_PREFIX: &str = "cache:";

/// Sled 缓存配置
#[derive(Debug, Clone)]
pub struct SledCacheConfig {
    /// 数据库路径
    pub db_path: String,
    /// 最大缓存大小（字节）
    pub max_size_bytes: u64,
    /// 条目有效期（秒）
    pub max_age_secs: u64,
}

impl Default for SledCacheConfig {
    fn default() -> Self {
        Self {
            db_path: "data/audio_cache".to_string(),
            max_size_bytes: 256 * 1024 * 1024,
            max_age_secs: 3600,
        }
    }
}

/// 内部缓存条目
#[derive(Debug, Clone, Serialize, Deserialize)]
struct InternalCacheEntry {
    audio_data: Vec<u8>,
    size_bytes: u64,
    text_hash: String,
    language: String,
    content_type: String,
    last_accessed: i64,
    created_at: i64,
}

/// Sled 音频缓存
pub struct SledAudioCache {
    db: Db,
    max_size_bytes: u64,
    max_age_secs: i64,
    current_size: AtomicU64,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl SledAudioCache {
    /// 创建新的缓存实例
    pub fn new(config: &SledCacheConfig) -> Result<Self, CacheError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| CacheError::DatabaseError(e.to_string()))?;

        let current_size = Self::calculate_total_size(&db)?;

        tracing::info!(
            db_path = %config.db_path,
            max_size_bytes = config.max_size_bytes,
            max_age_secs = config.max_age_secs,
            current_size = current_size,
            "SledAudioCache initialized"
        );

        Ok(Self {
            db,
            max_size_bytes: config.max_size_bytes,
            max_age_secs: i64::try_from(config.max_age_secs).unwrap_or(i64::MAX),
            current_size: AtomicU64::new(current_size),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        })
    }

    /// 打开现有缓存
    pub fn open<P: AsRef<Path>>(
        path: P,
        max_size_bytes: u64,
        max_age_secs: u64,
    ) -> Result<Self, CacheError> {
        let config = SledCacheConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
            max_size_bytes,
            max_age_secs,
        };
        Self::new(&config)
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn entry_key(cache_key: &str) -> String {
        format!("{}{}", ENTRY_PREFIX, cache_key)
    }

    /// 计算数据库中所有条目的总大小
    fn calculate_total_size(db: &Db) -> Result<u64, CacheError> {
        let mut total = 0u64;
        for item in db.scan_prefix(ENTRY_PREFIX) {
            let (_, value) = item.map_err(|e| CacheError::DatabaseError(e.to_string()))?;
            if let Ok(entry) = bincode::deserialize::<InternalCacheEntry>(&value) {
                total += entry.size_bytes;
            }
        }
        Ok(total)
    }

    fn is_expired(&self, entry: &InternalCacheEntry, now: i64) -> bool {
        now.saturating_sub(entry.created_at) > self.max_age_secs
    }

    /// 删除条目并扣减大小，返回被删除的字节数
    fn remove_entry(&self, key: &str) -> Result<u64, CacheError> {
        let removed = self
            .db
            .remove(key)
            .map_err(|e| CacheError::DatabaseError(e.to_string()))?;

        let size = removed
            .and_then(|data| bincode::deserialize::<InternalCacheEntry>(&data).ok())
            .map(|entry| entry.size_bytes)
            .unwrap_or(0);
        self.current_size.fetch_sub(
            size.min(self.current_size.load(Ordering::Relaxed)),
            Ordering::Relaxed,
        );
        Ok(size)
    }

    /// LRU 淘汰一个条目；缓存为空时返回 false
    fn evict_lru(&self) -> Result<bool, CacheError> {
        let mut oldest: Option<(String, i64)> = None;

        for item in self.db.scan_prefix(ENTRY_PREFIX) {
            let (key, value) = item.map_err(|e| CacheError::DatabaseError(e.to_string()))?;
            let key_str = String::from_utf8(key.to_vec())
                .map_err(|e| CacheError::SerializationError(e.to_string()))?;

            let last_accessed = match bincode::deserialize::<InternalCacheEntry>(&value) {
                Ok(entry) => entry.last_accessed,
                // 无法解析的条目优先清理
                Err(_) => i64::MIN,
            };

            let is_older = oldest
                .as_ref()
                .map(|(_, ts)| last_accessed < *ts)
                .unwrap_or(true);
            if is_older {
                oldest = Some((key_str, last_accessed));
            }
        }

        match oldest {
            Some((key, _)) => {
                let size_bytes = self.remove_entry(&key)?;
                tracing::debug!(key = %key, size_bytes, "LRU evicted cache entry");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 刷新数据库
    pub fn flush(&self) -> Result<(), CacheError> {
        self.db
            .flush()
            .map_err(|e| CacheError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl AudioCachePort for SledAudioCache {
    async fn put(
        &self,
        cache_key: &str,
        audio_data: Vec<u8>,
        metadata: CacheMetadata,
    ) -> Result<(), CacheError> {
        let size = audio_data.len() as u64;
        if size > self.max_size_bytes {
            return Err(CacheError::EvictionFailed);
        }

        let key = Self::entry_key(cache_key);
        // 覆盖写入时先扣除旧条目
        self.remove_entry(&key)?;

        while self.current_size.load(Ordering::Relaxed) + size > self.max_size_bytes {
            if !self.evict_lru()? {
                self.current_size.store(0, Ordering::Relaxed);
                break;
            }
        }

        let now = Utc::now().timestamp();
        let entry = InternalCacheEntry {
            audio_data,
            size_bytes: size,
            text_hash: metadata.text_hash,
            language: metadata.language,
            content_type: metadata.content_type,
            last_accessed: now,
            created_at: now,
        };

        let entry_bytes =
            bincode::serialize(&entry).map_err(|e| CacheError::SerializationError(e.to_string()))?;

        self.db
            .insert(&key, entry_bytes)
            .map_err(|e| CacheError::DatabaseError(e.to_string()))?;

        self.current_size.fetch_add(size, Ordering::Relaxed);

        tracing::debug!(
            cache_key = %cache_key,
            language = %entry.language,
            size_bytes = size,
            "Audio cached"
        );

        Ok(())
    }

    async fn get(&self, cache_key: &str) -> Result<Option<CachedAudio>, CacheError> {
        let key = Self::entry_key(cache_key);

        let data = match self.db.get(&key) {
            Ok(Some(data)) => data,
            Ok(None) => {
                self.miss_count.fetch_add(1, Ordering::Relaxed);
                return Ok(None);
            }
            Err(e) => return Err(CacheError::DatabaseError(e.to_string())),
        };

        let mut entry: InternalCacheEntry = bincode::deserialize(&data)
            .map_err(|e| CacheError::SerializationError(e.to_string()))?;

        let now = Utc::now().timestamp();
        if self.is_expired(&entry, now) {
            self.remove_entry(&key)?;
            self.miss_count.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(cache_key = %cache_key, "Cache entry expired");
            return Ok(None);
        }

        // 更新 last_accessed (LRU touch)
        entry.last_accessed = now;
        let entry_bytes = bincode::serialize(&entry)
            .map_err(|e| CacheError::SerializationError(e.to_string()))?;
        self.db
            .insert(&key, entry_bytes)
            .map_err(|e| CacheError::DatabaseError(e.to_string()))?;

        self.hit_count.fetch_add(1, Ordering::Relaxed);
        Ok(Some(CachedAudio {
            audio_data: entry.audio_data,
            content_type: entry.content_type,
        }))
    }

    async fn remove(&self, cache_key: &str) -> Result<(), CacheError> {
        self.remove_entry(&Self::entry_key(cache_key))?;
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        let total_entries = self.db.scan_prefix(ENTRY_PREFIX).count();

        CacheStats {
            total_entries,
            total_size_bytes: self.current_size.load(Ordering::Relaxed),
            max_size_bytes: self.max_size_bytes,
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn metadata(lang: &str) -> CacheMetadata {
        CacheMetadata {
            text_hash: "hash".to_string(),
            language: lang.to_string(),
            content_type: "audio/mpeg".to_string(),
        }
    }

    fn cache(dir: &Path, max_size_bytes: u64, max_age_secs: u64) -> SledAudioCache {
        SledAudioCache::open(dir.join("test.sled"), max_size_bytes, max_age_secs).unwrap()
    }

    #[tokio::test]
    async fn test_cache_put_get() {
        let dir = tempdir().unwrap();
        let cache = cache(dir.path(), 1024 * 1024, 3600);

        cache
            .put("abc:he", vec![1, 2, 3, 4, 5], metadata("he"))
            .await
            .unwrap();

        let hit = cache.get("abc:he").await.unwrap().unwrap();
        assert_eq!(hit.audio_data, vec![1, 2, 3, 4, 5]);
        assert_eq!(hit.content_type, "audio/mpeg");
        assert!(cache.get("abc:en").await.unwrap().is_none());

        let stats = cache.stats().await;
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.total_size_bytes, 5);
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 1);
    }

    #[tokio::test]
    async fn test_overwrite_does_not_double_count() {
        let dir = tempdir().unwrap();
        let cache = cache(dir.path(), 1024, 3600);

        cache.put("k", vec![0; 10], metadata("he")).await.unwrap();
        cache.put("k", vec![0; 10], metadata("he")).await.unwrap();

        assert_eq!(cache.stats().await.total_size_bytes, 10);
    }

    #[tokio::test]
    async fn test_lru_eviction_keeps_size_bounded() {
        let dir = tempdir().unwrap();
        let cache = cache(dir.path(), 25, 3600);

        cache.put("a", vec![0; 10], metadata("he")).await.unwrap();
        cache.put("b", vec![0; 10], metadata("he")).await.unwrap();
        cache.put("c", vec![0; 10], metadata("he")).await.unwrap();

        let stats = cache.stats().await;
        assert!(stats.total_size_bytes <= 25);
        assert_eq!(stats.total_entries, 2);
        assert!(cache.get("c").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_oversized_entry_is_rejected() {
        let dir = tempdir().unwrap();
        let cache = cache(dir.path(), 8, 3600);

        let err = cache.put("big", vec![0; 9], metadata("he")).await.unwrap_err();
        assert!(matches!(err, CacheError::EvictionFailed));
        assert_eq!(cache.stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache = cache(dir.path(), 1024, 0);

        let mut entry = InternalCacheEntry {
            audio_data: vec![1],
            size_bytes: 1,
            text_hash: "h".to_string(),
            language: "he".to_string(),
            content_type: "audio/mpeg".to_string(),
            last_accessed: 0,
            created_at: 0,
        };
        entry.created_at = Utc::now().timestamp() - 10;
        cache
            .db
            .insert(SledAudioCache::entry_key("old"), bincode::serialize(&entry).unwrap())
            .unwrap();

        assert!(cache.get("old").await.unwrap().is_none());
        assert_eq!(cache.stats().await.total_entries, 0);
    }
}
