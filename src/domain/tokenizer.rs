//! 单词分词器
//!
//! 按空白字符或希伯来连字符 Maqaf (U+05BE) 切分正文，连续分隔符合并

use crate::domain::passage::Token;

/// 希伯来连字符
pub const MAQAF: char = '\u{05BE}';

/// 希伯来文 Unicode 区块
const HEBREW_BLOCK: std::ops::RangeInclusive<char> = '\u{0590}'..='\u{05FF}';

/// 希伯来重音符号与元音点 (cantillation / niqqud)
const HEBREW_MARKS: std::ops::RangeInclusive<char> = '\u{0591}'..='\u{05C7}';

/// 查词前需要去除的 ASCII 标点
const LOOKUP_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

#[inline]
fn is_boundary(ch: char) -> bool {
    ch.is_whitespace() || ch == MAQAF
}

/// 对正文分词
///
/// - 分隔符: 一个或多个空白字符，或 Maqaf
/// - 不产生空 Token（首尾分隔符同样被忽略）
/// - 确定性: 相同输入总是得到相同序列
pub fn tokenize(body: &str) -> Vec<Token> {
    body.split(is_boundary)
        .filter(|word| !word.is_empty())
        .enumerate()
        .filter_map(|(index, word)| Token::new(index, word).ok())
        .collect()
}

/// 是否包含希伯来文字符 (U+0590–U+05FF)
///
/// 用于选择朗读后端/语音，以及选择 LTR/RTL 排版
pub fn is_right_to_left_script(text: &str) -> bool {
    text.chars().any(|c| HEBREW_BLOCK.contains(&c))
}

/// 去除希伯来重音符号与元音点
///
/// Maqaf 位于同一区间内，替换为空格而不是删除，避免两个单词被拼接
pub fn strip_hebrew_marks(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            MAQAF => Some(' '),
            c if HEBREW_MARKS.contains(&c) => None,
            c => Some(c),
        })
        .collect()
}

/// 去除 ASCII 标点
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| !LOOKUP_PUNCTUATION.contains(c))
        .collect()
}

/// 查词前清洗单词
///
/// 希伯来文去除元音点，其他文字去除标点
pub fn clean_for_lookup(word: &str) -> String {
    let cleaned = if is_right_to_left_script(word) {
        strip_hebrew_marks(word)
    } else {
        strip_punctuation(word)
    };
    cleaned.trim().to_string()
}
