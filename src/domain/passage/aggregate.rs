//! Passage Context - Aggregate Root

use super::{Language, PassageId, Slug, Title, Token};
use crate::domain::tokenizer::{is_right_to_left_script, tokenize};

/// Passage 聚合根
///
/// 不变量:
/// - 读取后不可变，由加载它的阅读会话持有
/// - tokens 始终由 body 派生，顺序即阅读顺序
#[derive(Debug, Clone)]
pub struct Passage {
    id: PassageId,
    title: Title,
    body: String,
    language: Language,
    slug: Option<Slug>,
    image_url: Option<String>,
    tokens: Vec<Token>,
}

impl Passage {
    pub fn new(
        id: PassageId,
        title: Title,
        body: impl Into<String>,
        language: Language,
        slug: Option<Slug>,
        image_url: Option<String>,
    ) -> Self {
        let body = body.into();
        let tokens = tokenize(&body);
        Self {
            id,
            title,
            body,
            language,
            slug,
            image_url,
            tokens,
        }
    }

    // Getters
    pub fn id(&self) -> PassageId {
        self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn slug(&self) -> Option<&Slug> {
        self.slug.as_ref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// 是否为从右到左书写（按正文内容检测，而非语言代码）
    pub fn is_right_to_left(&self) -> bool {
        is_right_to_left_script(&self.body)
    }
}
