//! Translator Port - 外部翻译服务抽象

use async_trait::async_trait;
use thiserror::Error;

/// 翻译错误
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Translator Port
#[async_trait]
pub trait TranslatorPort: Send + Sync {
    /// 翻译单词
    ///
    /// 服务没有给出译文时返回 `Ok(None)`
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Option<String>, TranslationError>;
}
