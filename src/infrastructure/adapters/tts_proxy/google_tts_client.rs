//! Google Translate TTS Client
//!
//! 实现 AudioRelayPort，服务端代为请求 translate_tts 并返回 MP3 字节
//!
//! GET {url}?ie=UTF-8&q={text}&tl={lang}&client=tw-ob
//! 需要浏览器 User-Agent，否则上游会拒绝请求

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use crate::application::ports::{AudioRelayPort, RelayError, RelayedAudio};

/// 返回给浏览器的音频类型
pub const PROXIED_AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Google TTS 客户端配置
#[derive(Debug, Clone)]
pub struct GoogleTtsClientConfig {
    /// translate_tts 接口地址
    pub url: String,
    /// `client` 参数
    pub client: String,
    /// 请求 User-Agent
    pub user_agent: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GoogleTtsClientConfig {
    fn default() -> Self {
        Self {
            url: "https://translate.google.com/translate_tts".to_string(),
            client: "tw-ob".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            timeout_secs: 15,
        }
    }
}

impl GoogleTtsClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Google TTS 客户端
pub struct GoogleTtsClient {
    client: Client,
    config: GoogleTtsClientConfig,
}

impl GoogleTtsClient {
    pub fn new(config: GoogleTtsClientConfig) -> Result<Self, RelayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RelayError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 拼接请求 URL（参数经过百分号编码）
    fn request_url(&self, text: &str, lang: &str) -> Result<Url, RelayError> {
        Url::parse_with_params(
            &self.config.url,
            &[
                ("ie", "UTF-8"),
                ("q", text),
                ("tl", lang),
                ("client", self.config.client.as_str()),
            ],
        )
        .map_err(|e| RelayError::UpstreamError(format!("Invalid TTS URL: {}", e)))
    }
}

#[async_trait]
impl AudioRelayPort for GoogleTtsClient {
    async fn fetch(&self, text: &str, lang: &str) -> Result<RelayedAudio, RelayError> {
        let url = self.request_url(text, lang)?;

        tracing::debug!(lang = %lang, text_len = text.len(), "Fetching proxied audio");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                RelayError::Timeout
            } else {
                RelayError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamError(format!("HTTP {}", status)));
        }

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| RelayError::NetworkError(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio_data.is_empty() {
            return Err(RelayError::UpstreamError("Empty audio".to_string()));
        }

        Ok(RelayedAudio {
            audio_data,
            content_type: PROXIED_AUDIO_CONTENT_TYPE.to_string(),
        })
    }
}
