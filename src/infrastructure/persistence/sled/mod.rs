//! Sled Persistence - 代理音频缓存

mod audio_cache;

pub use audio_cache::{SledAudioCache, SledCacheConfig};
