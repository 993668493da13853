//! Audio Relay Port - 远端 TTS 音频中转
//!
//! 浏览器无法直接访问远端 TTS（跨域），由服务端代为请求并原样返回字节流

use async_trait::async_trait;
use thiserror::Error;

/// 中转错误
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Upstream error: {0}")]
    UpstreamError(String),
}

/// 中转得到的音频
#[derive(Debug, Clone)]
pub struct RelayedAudio {
    pub audio_data: Vec<u8>,
    pub content_type: String,
}

/// Audio Relay Port
#[async_trait]
pub trait AudioRelayPort: Send + Sync {
    /// 获取 `text` 在语言 `lang` 下的合成音频
    async fn fetch(&self, text: &str, lang: &str) -> Result<RelayedAudio, RelayError>;
}
