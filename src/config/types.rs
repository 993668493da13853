//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::synchronizer::SynchronizerConfig;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 远端 TTS（代理音频）配置
    #[serde(default)]
    pub tts_proxy: TtsProxyConfig,

    /// 翻译服务配置
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// 代理音频缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 朗读同步配置
    #[serde(default)]
    pub reader: ReaderConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL（客户端据此拼出代理音频地址）
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/lector.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 远端 TTS 配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsProxyConfig {
    /// translate_tts 接口地址
    #[serde(default = "default_tts_proxy_url")]
    pub url: String,

    /// `client` 参数
    #[serde(default = "default_tts_client")]
    pub client: String,

    /// 请求使用的浏览器 User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,
}

fn default_tts_proxy_url() -> String {
    "https://translate.google.com/translate_tts".to_string()
}

fn default_tts_client() -> String {
    "tw-ob".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_tts_timeout() -> u64 {
    15
}

impl Default for TtsProxyConfig {
    fn default() -> Self {
        Self {
            url: default_tts_proxy_url(),
            client: default_tts_client(),
            user_agent: default_user_agent(),
            timeout_secs: default_tts_timeout(),
        }
    }
}

/// 翻译服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorConfig {
    /// MyMemory 接口地址
    #[serde(default = "default_translator_url")]
    pub url: String,

    /// 目标语言
    #[serde(default = "default_target_lang")]
    pub target_lang: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_translator_timeout")]
    pub timeout_secs: u64,
}

fn default_translator_url() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_target_lang() -> String {
    "es".to_string()
}

fn default_translator_timeout() -> u64 {
    10
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            url: default_translator_url(),
            target_lang: default_target_lang(),
            timeout_secs: default_translator_timeout(),
        }
    }
}

/// 代理音频缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Sled 数据目录
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,

    /// 最大缓存空间（字节）
    #[serde(default = "default_cache_max_size")]
    pub max_size_bytes: u64,

    /// 条目有效期（秒），与 Cache-Control max-age 一致
    #[serde(default = "default_cache_max_age")]
    pub max_age_secs: u64,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("data/audio_cache")
}

fn default_cache_max_size() -> u64 {
    256 * 1024 * 1024 // 256 MB
}

fn default_cache_max_age() -> u64 {
    3600
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            max_size_bytes: default_cache_max_size(),
            max_age_secs: default_cache_max_age(),
        }
    }
}

/// 朗读同步配置
#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    /// 代理音频逐词推进间隔（毫秒）
    #[serde(default = "default_word_interval")]
    pub word_interval_ms: u64,

    /// 代理音频结束信号缺失时的兜底宽限（毫秒）
    #[serde(default = "default_fallback_timeout")]
    pub fallback_timeout_ms: u64,

    /// 打开文章后自动朗读全文的延迟（毫秒），未设置则不自动朗读
    #[serde(default)]
    pub autoplay_delay_ms: Option<u64>,
}

fn default_word_interval() -> u64 {
    500
}

fn default_fallback_timeout() -> u64 {
    8000
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            word_interval_ms: default_word_interval(),
            fallback_timeout_ms: default_fallback_timeout(),
            autoplay_delay_ms: None,
        }
    }
}

impl ReaderConfig {
    pub fn synchronizer(&self) -> SynchronizerConfig {
        SynchronizerConfig {
            word_interval: Duration::from_millis(self.word_interval_ms),
            fallback_timeout: Duration::from_millis(self.fallback_timeout_ms),
        }
    }

    pub fn autoplay_delay(&self) -> Option<Duration> {
        self.autoplay_delay_ms.map(Duration::from_millis)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
