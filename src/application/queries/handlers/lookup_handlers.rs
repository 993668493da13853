//! Lookup Query Handlers - 词典优先，翻译服务兜底

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{DictionaryRepositoryPort, TranslatorPort};
use crate::application::queries::{
    DictionaryEntry, LookupDictionary, LookupResult, LookupSource, LookupWord,
    TRANSLATION_NOT_FOUND,
};
use crate::domain::passage::Language;
use crate::domain::{clean_for_lookup, is_right_to_left_script};

/// LookupDictionary Handler - 精确匹配，未命中返回 None
pub struct LookupDictionaryHandler {
    dictionary: Arc<dyn DictionaryRepositoryPort>,
}

impl LookupDictionaryHandler {
    pub fn new(dictionary: Arc<dyn DictionaryRepositoryPort>) -> Self {
        Self { dictionary }
    }

    pub async fn handle(
        &self,
        query: LookupDictionary,
    ) -> Result<DictionaryEntry, ApplicationError> {
        let translation = self.dictionary.lookup(&query.word).await?;
        Ok(DictionaryEntry {
            word: query.word,
            translation,
        })
    }
}

/// LookupWord Handler
pub struct LookupWordHandler {
    dictionary: Arc<dyn DictionaryRepositoryPort>,
    translator: Arc<dyn TranslatorPort>,
    target_lang: String,
}

impl LookupWordHandler {
    pub fn new(
        dictionary: Arc<dyn DictionaryRepositoryPort>,
        translator: Arc<dyn TranslatorPort>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            dictionary,
            translator,
            target_lang: target_lang.into(),
        }
    }

    pub async fn handle(&self, query: LookupWord) -> Result<LookupResult, ApplicationError> {
        let hebrew = is_right_to_left_script(&query.word);

        if hebrew {
            if let Some(translation) = self.dictionary.lookup(&query.word).await? {
                tracing::debug!(word = %query.word, "Dictionary hit");
                return Ok(LookupResult {
                    word: query.word,
                    translation,
                    source: LookupSource::Dictionary,
                });
            }
        }

        let cleaned = clean_for_lookup(&query.word);
        if cleaned.is_empty() {
            return Ok(not_found(query.word));
        }

        let source_lang = if hebrew {
            Language::Hebrew.code().to_string()
        } else {
            query
                .language
                .as_deref()
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .and_then(|code| Language::from_code(code).ok())
                .unwrap_or_default()
                .code()
                .to_string()
        };

        let translated = self
            .translator
            .translate(&cleaned, &source_lang, &self.target_lang)
            .await
            .map_err(|e| {
                tracing::warn!(word = %cleaned, error = %e, "Translation failed");
                ApplicationError::from(e)
            })?;

        match translated.filter(|t| !t.trim().is_empty()) {
            Some(translation) => Ok(LookupResult {
                word: query.word,
                translation,
                source: LookupSource::Translator,
            }),
            None => Ok(not_found(query.word)),
        }
    }
}

fn not_found(word: String) -> LookupResult {
    LookupResult {
        word,
        translation: TRANSLATION_NOT_FOUND.to_string(),
        source: LookupSource::None,
    }
}
