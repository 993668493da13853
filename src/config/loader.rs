//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `LECTOR_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `LECTOR_SERVER__PORT=8080`
/// - `LECTOR_DATABASE__PATH=/data/lector.db`
/// - `LECTOR_READER__WORD_INTERVAL_MS=450`
/// - `LECTOR_TRANSLATOR__TARGET_LANG=es`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("database.path", "data/lector.db")?
        .set_default("database.max_connections", 5)?
        .set_default("tts_proxy.url", "https://translate.google.com/translate_tts")?
        .set_default("tts_proxy.client", "tw-ob")?
        .set_default("tts_proxy.timeout_secs", 15)?
        .set_default("translator.url", "https://api.mymemory.translated.net/get")?
        .set_default("translator.target_lang", "es")?
        .set_default("translator.timeout_secs", 10)?
        .set_default("cache.path", "data/audio_cache")?
        .set_default("cache.max_size_bytes", 256_u64 * 1024 * 1024)?
        .set_default("cache.max_age_secs", 3600)?
        .set_default("reader.word_interval_ms", 500)?
        .set_default("reader.fallback_timeout_ms", 8000)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: LECTOR_TTS_PROXY__URL=http://localhost:9000/tts
    builder = builder.add_source(
        Environment::with_prefix("LECTOR")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if config.tts_proxy.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS proxy URL cannot be empty".to_string(),
        ));
    }

    if config.translator.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Translator URL cannot be empty".to_string(),
        ));
    }

    if config.reader.word_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Reader word interval cannot be 0".to_string(),
        ));
    }

    if config.reader.fallback_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Reader fallback timeout cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("TTS Proxy URL: {}", config.tts_proxy.url);
    tracing::info!("Translator URL: {}", config.translator.url);
    tracing::info!("Translation Target: {}", config.translator.target_lang);
    tracing::info!("Audio Cache: {:?}", config.cache.path);
    tracing::info!("Audio Cache Max Age: {}s", config.cache.max_age_secs);
    tracing::info!("Word Interval: {}ms", config.reader.word_interval_ms);
    tracing::info!("Fallback Timeout: {}ms", config.reader.fallback_timeout_ms);
    if let Some(delay) = config.reader.autoplay_delay_ms {
        tracing::info!("Autoplay Delay: {}ms", delay);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
