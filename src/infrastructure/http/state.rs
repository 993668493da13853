//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;
use std::time::Duration;

use crate::application::{
    // Command handlers
    CloseReaderHandler, OpenReaderHandler, SpeakAllHandler, SpeakTokenHandler,
    StopReadingHandler,
    // Query handlers
    GetPassageByIdHandler, GetPassageBySlugHandler, GetProxiedAudioHandler,
    GetReaderHighlightHandler, ListCategoryHandler, ListFeaturedPassagesHandler,
    LookupDictionaryHandler, LookupWordHandler,
    // Ports
    AudioCachePort, AudioRelayPort, CategoryRepositoryPort, DictionaryRepositoryPort,
    PassageRepositoryPort, ReaderRegistryPort, SynchronizerConfig, TranslatorPort,
};

/// 阅读相关的运行参数
#[derive(Debug, Clone)]
pub struct ReaderSettings {
    pub synchronizer: SynchronizerConfig,
    /// 打开文章后自动朗读全文的延迟
    pub autoplay_delay: Option<Duration>,
    /// 浏览器可访问的服务地址，用于拼出代理音频 URL
    pub public_base_url: String,
    /// 翻译目标语言
    pub target_lang: String,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            synchronizer: SynchronizerConfig::default(),
            autoplay_delay: None,
            public_base_url: "http://localhost:5060".to_string(),
            target_lang: "es".to_string(),
        }
    }
}

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub passage_repo: Arc<dyn PassageRepositoryPort>,
    pub category_repo: Arc<dyn CategoryRepositoryPort>,
    pub dictionary_repo: Arc<dyn DictionaryRepositoryPort>,
    pub reader_registry: Arc<dyn ReaderRegistryPort>,
    pub settings: ReaderSettings,

    // ========== Command Handlers ==========
    pub open_reader_handler: OpenReaderHandler,
    pub close_reader_handler: CloseReaderHandler,
    pub speak_token_handler: SpeakTokenHandler,
    pub speak_all_handler: SpeakAllHandler,
    pub stop_reading_handler: StopReadingHandler,

    // ========== Query Handlers ==========
    pub get_passage_by_slug_handler: GetPassageBySlugHandler,
    pub get_passage_by_id_handler: GetPassageByIdHandler,
    pub list_featured_handler: ListFeaturedPassagesHandler,
    pub list_category_handler: ListCategoryHandler,
    pub lookup_dictionary_handler: LookupDictionaryHandler,
    pub lookup_word_handler: LookupWordHandler,
    pub get_proxied_audio_handler: GetProxiedAudioHandler,
    pub get_reader_highlight_handler: GetReaderHighlightHandler,
}

impl AppState {
    /// 创建应用状态
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        passage_repo: Arc<dyn PassageRepositoryPort>,
        category_repo: Arc<dyn CategoryRepositoryPort>,
        dictionary_repo: Arc<dyn DictionaryRepositoryPort>,
        translator: Arc<dyn TranslatorPort>,
        audio_relay: Arc<dyn AudioRelayPort>,
        audio_cache: Arc<dyn AudioCachePort>,
        reader_registry: Arc<dyn ReaderRegistryPort>,
        settings: ReaderSettings,
    ) -> Self {
        Self {
            // Command handlers
            open_reader_handler: OpenReaderHandler::new(
                passage_repo.clone(),
                reader_registry.clone(),
                settings.synchronizer,
            ),
            close_reader_handler: CloseReaderHandler::new(reader_registry.clone()),
            speak_token_handler: SpeakTokenHandler::new(reader_registry.clone()),
            speak_all_handler: SpeakAllHandler::new(reader_registry.clone()),
            stop_reading_handler: StopReadingHandler::new(reader_registry.clone()),

            // Query handlers
            get_passage_by_slug_handler: GetPassageBySlugHandler::new(passage_repo.clone()),
            get_passage_by_id_handler: GetPassageByIdHandler::new(passage_repo.clone()),
            list_featured_handler: ListFeaturedPassagesHandler::new(passage_repo.clone()),
            list_category_handler: ListCategoryHandler::new(
                category_repo.clone(),
                passage_repo.clone(),
            ),
            lookup_dictionary_handler: LookupDictionaryHandler::new(dictionary_repo.clone()),
            lookup_word_handler: LookupWordHandler::new(
                dictionary_repo.clone(),
                translator,
                settings.target_lang.clone(),
            ),
            get_proxied_audio_handler: GetProxiedAudioHandler::new(audio_relay, audio_cache),
            get_reader_highlight_handler: GetReaderHighlightHandler::new(reader_registry.clone()),

            // Ports
            passage_repo,
            category_repo,
            dictionary_repo,
            reader_registry,
            settings,
        }
    }
}
