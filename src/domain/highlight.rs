//! 朗读高亮状态

use serde::Serialize;

use crate::domain::passage::Token;

/// UI 观察的高亮状态
///
/// 不变量: `active_index` 非空时总是当前 Token 序列的合法下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HighlightState {
    pub active_index: Option<usize>,
    pub is_playing_all: bool,
}

impl HighlightState {
    /// 空闲：无高亮、未在朗读全文
    pub const IDLE: HighlightState = HighlightState {
        active_index: None,
        is_playing_all: false,
    };

    pub fn word(index: usize) -> Self {
        Self {
            active_index: Some(index),
            is_playing_all: false,
        }
    }

    pub fn playing_all(index: usize) -> Self {
        Self {
            active_index: Some(index),
            is_playing_all: true,
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}

/// 将语音合成 boundary 事件的字符偏移映射为 Token 下标
///
/// 逐个累加 `len(token) + 1`（分隔符折叠为一个字符），
/// 第一个累计值达到或超过偏移的 Token 即为当前单词。
/// 偏移超出末尾时钳制到最后一个 Token；无 Token 时返回 None。
///
/// 每个事件独立计算，不做缓存。
pub fn token_index_for_offset(tokens: &[Token], char_offset: usize) -> Option<usize> {
    let last = tokens.len().checked_sub(1)?;
    let mut running = 0usize;

    for (position, token) in tokens.iter().enumerate() {
        if running >= char_offset {
            return Some(position);
        }
        running += token.utf16_len() + 1;
    }

    Some(last)
}
