//! Domain Layer - 领域层
//!
//! 包含:
//! - Passage Context: 文章（阅读文本）管理
//! - 分词器: 按空白与希伯来连字符 (Maqaf) 切分单词
//! - 高亮状态: 朗读时当前单词的游标

pub mod passage;

mod highlight;
mod tokenizer;

pub use highlight::{token_index_for_offset, HighlightState};
pub use tokenizer::{
    clean_for_lookup, is_right_to_left_script, strip_hebrew_marks, strip_punctuation, tokenize,
    MAQAF,
};
