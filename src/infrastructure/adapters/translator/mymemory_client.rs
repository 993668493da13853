//! MyMemory Translation Client
//!
//! GET {url}?q={word}&langpair={src}|{target}
//! Response: {"responseData": {"translatedText": "..."}, "responseStatus": 200}

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{TranslationError, TranslatorPort};

/// MyMemory 客户端配置
#[derive(Debug, Clone)]
pub struct MyMemoryClientConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for MyMemoryClientConfig {
    fn default() -> Self {
        Self {
            url: "https://api.mymemory.translated.net/get".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
    /// 上游有时返回数字、有时返回字符串
    #[serde(rename = "responseStatus", default)]
    response_status: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl MyMemoryResponse {
    fn status_code(&self) -> Option<u16> {
        match self.response_status.as_ref()? {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    fn into_translation(self) -> Result<Option<String>, TranslationError> {
        if let Some(code) = self.status_code() {
            if code != 200 {
                return Err(TranslationError::ServiceError(format!(
                    "responseStatus {}",
                    code
                )));
            }
        }
        Ok(self
            .response_data
            .and_then(|data| data.translated_text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()))
    }
}

/// MyMemory 翻译客户端
pub struct MyMemoryClient {
    client: Client,
    config: MyMemoryClientConfig,
}

impl MyMemoryClient {
    pub fn new(config: MyMemoryClientConfig) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranslationError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn request_url(&self, text: &str, langpair: &str) -> Result<Url, TranslationError> {
        Url::parse_with_params(&self.config.url, &[("q", text), ("langpair", langpair)])
            .map_err(|e| TranslationError::ServiceError(format!("Invalid translator URL: {}", e)))
    }
}

#[async_trait]
impl TranslatorPort for MyMemoryClient {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Option<String>, TranslationError> {
        let langpair = format!("{}|{}", source_lang, target_lang);
        let url = self.request_url(text, &langpair)?;

        tracing::debug!(langpair = %langpair, "Requesting translation");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                TranslationError::Timeout
            } else {
                TranslationError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::ServiceError(format!("HTTP {}", status)));
        }

        let body: MyMemoryResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

        body.into_translation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Option<String>, TranslationError> {
        serde_json::from_str::<MyMemoryResponse>(json)
            .unwrap()
            .into_translation()
    }

    #[test]
    fn test_parse_translation() {
        let result = parse(r#"{"responseData":{"translatedText":" paz "},"responseStatus":200}"#);
        assert_eq!(result.unwrap().as_deref(), Some("paz"));
    }

    #[test]
    fn test_parse_empty_translation() {
        let result = parse(r#"{"responseData":{"translatedText":""},"responseStatus":"200"}"#);
        assert!(result.unwrap().is_none());

        let result = parse(r#"{"responseData":null}"#);
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_parse_service_error() {
        let result = parse(r#"{"responseData":{"translatedText":"INVALID LANGUAGE PAIR"},"responseStatus":"403"}"#);
        assert!(matches!(result, Err(TranslationError::ServiceError(_))));
    }

    #[test]
    fn test_langpair_is_encoded() {
        let client = MyMemoryClient::new(MyMemoryClientConfig::default()).unwrap();
        let url = client.request_url("עולם", "he|es").unwrap();
        let langpair = url
            .query_pairs()
            .find(|(k, _)| k == "langpair")
            .map(|(_, v)| v.into_owned());
        assert_eq!(langpair.as_deref(), Some("he|es"));
    }
}
