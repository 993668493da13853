//! Speech Ports - 朗读后端抽象
//!
//! 两种音频能力：
//! - NativeSpeechPort: 本地语音合成，会上报单词 boundary 事件
//! - ProxiedAudioPort: 远端代理音频流，没有任何进度信息
//!
//! 命令是非阻塞的（只负责下发），事件通过阅读会话的 inbox 异步回传，
//! 并携带发起时的 SessionId，便于识别过期回调。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 播放会话标识
///
/// 每次开始播放单调递增；事件携带的 id 不等于当前会话时即为过期事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 播放错误（非致命）
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Native speech failed: {0}")]
    NativeSpeech(String),

    #[error("Proxied audio failed: {0}")]
    ProxiedAudio(String),

    #[error("Audio output disconnected")]
    Disconnected,
}

/// 朗读请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    /// 发起本次请求的会话
    pub session: SessionId,
    /// 要朗读的文本
    pub text: String,
    /// 语言标签：本地合成为 BCP-47 (en-US)，代理音频为两字母代码 (he)
    pub language_tag: String,
}

/// 本地语音合成事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeSpeechEvent {
    Started,
    /// 单词边界，偏移为 UTF-16 码元
    Boundary { char_index: usize },
    Ended,
    Cancelled,
    Failed(String),
}

/// 代理音频事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxiedAudioEvent {
    Ended,
    Failed(String),
}

/// Native Speech Port
pub trait NativeSpeechPort: Send + Sync {
    /// 开始一次朗读
    fn speak(&self, request: SpeechRequest) -> Result<(), PlaybackError>;

    /// 立即取消所有朗读
    fn cancel(&self);
}

/// Proxied Audio Port
pub trait ProxiedAudioPort: Send + Sync {
    /// 请求并播放代理音频
    fn play(&self, request: SpeechRequest) -> Result<(), PlaybackError>;

    /// 暂停并清空音频源，释放上一条音频流
    fn pause_and_unload(&self);
}
