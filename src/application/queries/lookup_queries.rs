//! Lookup Queries - 查词

use serde::Serialize;

/// 没有译文时返回的占位文本
pub const TRANSLATION_NOT_FOUND: &str = "Traducción no encontrada";

/// 查词：先查词典，未命中再调用翻译服务
#[derive(Debug, Clone)]
pub struct LookupWord {
    pub word: String,
    /// 文章语言代码，缺省视为英语
    pub language: Option<String>,
}

/// 只查词典
#[derive(Debug, Clone)]
pub struct LookupDictionary {
    pub word: String,
}

/// 译文来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupSource {
    Dictionary,
    Translator,
    None,
}

/// 查词结果
#[derive(Debug, Clone, Serialize)]
pub struct LookupResult {
    pub word: String,
    pub translation: String,
    pub source: LookupSource,
}

/// 词典查词结果
#[derive(Debug, Clone, Serialize)]
pub struct DictionaryEntry {
    pub word: String,
    pub translation: Option<String>,
}
