//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_cache;
mod audio_relay;
mod reader_registry;
mod repositories;
mod speech;
mod translator;

pub use audio_cache::{
    generate_cache_key, AudioCachePort, CacheError, CacheMetadata, CacheStats, CachedAudio,
};
pub use audio_relay::{AudioRelayPort, RelayError, RelayedAudio};
pub use reader_registry::{ReaderEntry, ReaderError, ReaderRegistryPort};
pub use repositories::{
    CategoryRecord, CategoryRepositoryPort, DictionaryRepositoryPort, PassageRecord,
    PassageRepositoryPort, RepositoryError,
};
pub use speech::{
    NativeSpeechEvent, NativeSpeechPort, PlaybackError, ProxiedAudioEvent, ProxiedAudioPort,
    SessionId, SpeechRequest,
};
pub use translator::{TranslationError, TranslatorPort};
