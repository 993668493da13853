//! Passage Context - Entities

use serde::{Deserialize, Serialize};

/// 单词 Token - 最小点读/高亮单位
///
/// 不变量:
/// - index 为分词序列中的位置（阅读顺序）
/// - text 不可为空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    index: usize,
    text: String,
}

impl Token {
    pub fn new(index: usize, text: impl Into<String>) -> Result<Self, &'static str> {
        let text = text.into();
        if text.is_empty() {
            return Err("Token 内容不能为空");
        }
        Ok(Self { index, text })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// UTF-16 码元长度
    ///
    /// 浏览器语音合成的 boundary 事件以 UTF-16 偏移计数
    pub fn utf16_len(&self) -> usize {
        self.text.encode_utf16().count()
    }
}
