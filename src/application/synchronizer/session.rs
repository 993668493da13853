//! 播放会话状态机
//!
//! ```text
//! Idle ──speak──▶ Speaking  ──end/cancel/error──▶ Idle     (本地合成)
//! Idle ──play───▶ Streaming ──ended/fallback/error──▶ Idle (代理音频)
//! 任意状态 ──stop/新的播放──▶ teardown ──▶ Idle
//! ```

use super::timer::TimerHandle;
use crate::application::ports::SessionId;

/// 播放范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    /// 点读单个单词
    Word,
    /// 朗读全文
    Passage,
}

/// 当前播放会话
///
/// 同步器任意时刻只持有一个会话；替换前必须先 teardown
#[derive(Debug, Default)]
pub enum PlaybackSession {
    #[default]
    Idle,
    /// 本地语音合成中，由 boundary 事件驱动高亮
    Speaking { id: SessionId, mode: PlaybackMode },
    /// 代理音频播放中，由定时器估算高亮
    Streaming {
        id: SessionId,
        mode: PlaybackMode,
        /// 逐词推进的重复定时器；到达最后一个单词后清空
        ticker: Option<TimerHandle>,
        /// 结束信号缺失时的兜底定时器
        fallback: Option<TimerHandle>,
    },
}

impl PlaybackSession {
    pub fn id(&self) -> Option<SessionId> {
        match self {
            PlaybackSession::Idle => None,
            PlaybackSession::Speaking { id, .. } | PlaybackSession::Streaming { id, .. } => {
                Some(*id)
            }
        }
    }

    pub fn mode(&self) -> Option<PlaybackMode> {
        match self {
            PlaybackSession::Idle => None,
            PlaybackSession::Speaking { mode, .. } | PlaybackSession::Streaming { mode, .. } => {
                Some(*mode)
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PlaybackSession::Idle)
    }

    pub fn is_ticking(&self) -> bool {
        matches!(self, PlaybackSession::Streaming { ticker: Some(_), .. })
    }
}
