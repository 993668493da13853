//! Passage Context - Value Objects

use serde::{Deserialize, Serialize};

use super::PassageError;

/// 文章唯一标识（数据库自增主键）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassageId(i64);

impl PassageId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PassageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 文章标题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn new(title: impl Into<String>) -> Result<Self, PassageError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PassageError::InvalidTitle("标题不能为空".to_string()));
        }
        if title.chars().count() > 200 {
            return Err(PassageError::InvalidTitle(
                "标题长度不能超过200字符".to_string(),
            ));
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 文章标识
///
/// 原样保留数据库中的值（大小写、非 ASCII 字符都可能出现），只拒绝空白
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn new(slug: impl Into<String>) -> Result<Self, PassageError> {
        let slug = slug.into();
        if slug.trim().is_empty() {
            return Err(PassageError::InvalidSlug(slug));
        }
        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 文章语言
///
/// 决定朗读时使用的语音标签，以及代理音频请求的语言代码
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Language {
    Hebrew,
    Greek,
    #[default]
    English,
    French,
    /// 其他语言，保留原始代码
    Other(String),
}

impl Language {
    /// 从数据库中的语言代码解析
    ///
    /// 空代码视为数据错误
    pub fn from_code(code: &str) -> Result<Self, PassageError> {
        let normalized = code.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" => Err(PassageError::InvalidLanguage(code.to_string())),
            "he" | "heb" | "iw" => Ok(Language::Hebrew),
            "el" | "gr" | "grc" => Ok(Language::Greek),
            "en" => Ok(Language::English),
            "fr" => Ok(Language::French),
            other => Ok(Language::Other(other.to_string())),
        }
    }

    /// 两字母语言代码（代理音频 `tl` 参数、翻译 langpair）
    pub fn code(&self) -> &str {
        match self {
            Language::Hebrew => "he",
            Language::Greek => "el",
            Language::English => "en",
            Language::French => "fr",
            Language::Other(code) => code,
        }
    }

    /// 本地语音合成使用的 BCP-47 标签
    pub fn speech_tag(&self) -> String {
        match self {
            Language::Hebrew => "he-IL".to_string(),
            Language::Greek => "el-GR".to_string(),
            Language::English => "en-US".to_string(),
            Language::French => "fr-FR".to_string(),
            Language::Other(code) => code.clone(),
        }
    }

    pub fn is_right_to_left(&self) -> bool {
        matches!(self, Language::Hebrew)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
