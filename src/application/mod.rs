//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、朗读后端、翻译、音频中转等）
//! - synchronizer: 朗读同步器与阅读会话
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod synchronizer;

// Re-exports
pub use commands::{
    // Reader commands
    CloseReaderCommand,
    OpenReaderCommand,
    OpenReaderResponse,
    ReaderCommandResponse,
    SpeakAllCommand,
    SpeakTokenCommand,
    StopReadingCommand,
    // Handlers
    handlers::{
        CloseReaderHandler, OpenReaderHandler, SpeakAllHandler, SpeakTokenHandler,
        StopReadingHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Audio cache
    generate_cache_key,
    AudioCachePort,
    CacheError,
    CacheMetadata,
    CacheStats,
    CachedAudio,
    // Audio relay
    AudioRelayPort,
    RelayError,
    RelayedAudio,
    // Reader registry
    ReaderEntry,
    ReaderError,
    ReaderRegistryPort,
    // Repositories
    CategoryRecord,
    CategoryRepositoryPort,
    DictionaryRepositoryPort,
    PassageRecord,
    PassageRepositoryPort,
    RepositoryError,
    // Speech
    NativeSpeechEvent,
    NativeSpeechPort,
    PlaybackError,
    ProxiedAudioEvent,
    ProxiedAudioPort,
    SessionId,
    SpeechRequest,
    // Translator
    TranslationError,
    TranslatorPort,
};

pub use queries::{
    // Audio queries
    GetProxiedAudio,
    ProxiedAudioResponse,
    // Lookup queries
    DictionaryEntry,
    LookupDictionary,
    LookupResult,
    LookupSource,
    LookupWord,
    // Passage queries
    CategoryEntry,
    CategoryListing,
    GetPassageById,
    GetPassageBySlug,
    ListCategory,
    ListFeaturedPassages,
    PassageSummary,
    // Reader queries
    GetReaderHighlight,
    // Handlers
    handlers::{
        GetPassageByIdHandler, GetPassageBySlugHandler, GetProxiedAudioHandler,
        GetReaderHighlightHandler, ListCategoryHandler, ListFeaturedPassagesHandler,
        LookupDictionaryHandler, LookupWordHandler,
    },
};

pub use synchronizer::{spawn_reader, ReaderHandle, SynchronizerConfig};
