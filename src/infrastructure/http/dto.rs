//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::domain::passage::Passage;
use crate::domain::HighlightState;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Passage DTOs
// ============================================================================

/// 文章详情
#[derive(Debug, Clone, Serialize)]
pub struct PassageDto {
    pub id: i64,
    pub title: String,
    pub slug: Option<String>,
    pub language: String,
    pub body: String,
    pub image_url: Option<String>,
    pub rtl: bool,
}

impl From<&Passage> for PassageDto {
    fn from(passage: &Passage) -> Self {
        Self {
            id: passage.id().value(),
            title: passage.title().as_str().to_string(),
            slug: passage.slug().map(|s| s.as_str().to_string()),
            language: passage.language().code().to_string(),
            body: passage.body().to_string(),
            image_url: passage.image_url().map(str::to_string),
            rtl: passage.is_right_to_left(),
        }
    }
}

// ============================================================================
// Lookup DTOs
// ============================================================================

/// `/api/lookup` 查询参数
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

/// `/api/proxy-audio` 查询参数
#[derive(Debug, Deserialize)]
pub struct ProxyAudioParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default = "default_proxy_lang")]
    pub tl: String,
}

fn default_proxy_lang() -> String {
    "he".to_string()
}

// ============================================================================
// Reader DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SpeakTokenRequest {
    pub reader_id: String,
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct ReaderRequest {
    pub reader_id: String,
}

#[derive(Debug, Serialize)]
pub struct ReaderAck {
    pub reader_id: String,
}

#[derive(Debug, Serialize)]
pub struct HighlightDto {
    pub reader_id: String,
    pub active_index: Option<usize>,
    pub is_playing_all: bool,
}

impl HighlightDto {
    pub fn new(reader_id: String, state: HighlightState) -> Self {
        Self {
            reader_id,
            active_index: state.active_index,
            is_playing_all: state.is_playing_all,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::passage::{Language, PassageId, Slug, Title};

    #[test]
    fn test_passage_dto_from_hebrew_passage() {
        let passage = Passage::new(
            PassageId::new(4),
            Title::new("Bereshit").unwrap(),
            "בראשית ברא",
            Language::Hebrew,
            Some(Slug::new("bereshit").unwrap()),
            None,
        );

        let dto = PassageDto::from(&passage);
        assert_eq!(dto.id, 4);
        assert_eq!(dto.slug.as_deref(), Some("bereshit"));
        assert_eq!(dto.language, "he");
        assert!(dto.rtl);
    }

    #[test]
    fn test_proxy_params_default_language() {
        let params: ProxyAudioParams = serde_json::from_str(r#"{"q": "shalom"}"#).unwrap();
        assert_eq!(params.tl, "he");
    }
}
