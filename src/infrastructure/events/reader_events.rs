//! Reader WebSocket 消息
//!
//! - ReaderEvent: 服务端 -> 客户端（高亮、播放指令）
//! - ClientMessage: 客户端 -> 服务端（用户命令、音频事件回传）

use serde::{Deserialize, Serialize};

use crate::application::ports::{NativeSpeechEvent, ProxiedAudioEvent, SessionId};
use crate::domain::passage::Token;
use crate::domain::HighlightState;
use crate::infrastructure::http::dto::PassageDto;

/// 服务端推送事件
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ReaderEvent {
    /// 文章已加载
    PassageLoaded {
        reader_id: String,
        passage: PassageDto,
        tokens: Vec<Token>,
        rtl: bool,
    },
    /// 高亮变化
    Highlight {
        active_index: Option<usize>,
        is_playing_all: bool,
    },
    /// 使用本地语音合成朗读
    Speak {
        session: SessionId,
        text: String,
        lang: String,
    },
    /// 取消本地语音合成
    CancelSpeech,
    /// 播放代理音频
    PlayAudio { session: SessionId, url: String },
    /// 暂停并卸载代理音频
    StopAudio,
    /// 文章不存在
    PassageNotFound { slug: String },
    /// 命令错误
    Error { message: String },
}

impl From<HighlightState> for ReaderEvent {
    fn from(state: HighlightState) -> Self {
        ReaderEvent::Highlight {
            active_index: state.active_index,
            is_playing_all: state.is_playing_all,
        }
    }
}

/// 客户端消息
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    SpeakToken {
        index: usize,
    },
    SpeakAll,
    Stop,
    SpeechStarted {
        session: SessionId,
    },
    SpeechBoundary {
        session: SessionId,
        char_index: usize,
        /// boundary 类型（word / sentence），缺省按 word 处理
        #[serde(default)]
        name: Option<String>,
    },
    SpeechEnded {
        session: SessionId,
    },
    SpeechCancelled {
        session: SessionId,
    },
    SpeechError {
        session: SessionId,
        error: String,
    },
    AudioEnded {
        session: SessionId,
    },
    AudioError {
        session: SessionId,
        error: String,
    },
}

/// 客户端消息分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientInput {
    SpeakToken(usize),
    SpeakAll,
    Stop,
    Native(SessionId, NativeSpeechEvent),
    Proxied(SessionId, ProxiedAudioEvent),
    /// 不需要转发的消息（如 sentence boundary）
    Ignored,
}

impl From<ClientMessage> for ClientInput {
    fn from(msg: ClientMessage) -> Self {
        match msg {
            ClientMessage::SpeakToken { index } => ClientInput::SpeakToken(index),
            ClientMessage::SpeakAll => ClientInput::SpeakAll,
            ClientMessage::Stop => ClientInput::Stop,
            ClientMessage::SpeechStarted { session } => {
                ClientInput::Native(session, NativeSpeechEvent::Started)
            }
            ClientMessage::SpeechBoundary {
                session,
                char_index,
                name,
            } => match name.as_deref() {
                None | Some("word") => {
                    ClientInput::Native(session, NativeSpeechEvent::Boundary { char_index })
                }
                Some(_) => ClientInput::Ignored,
            },
            ClientMessage::SpeechEnded { session } => {
                ClientInput::Native(session, NativeSpeechEvent::Ended)
            }
            ClientMessage::SpeechCancelled { session } => {
                ClientInput::Native(session, NativeSpeechEvent::Cancelled)
            }
            // 浏览器 cancel() 会以 interrupted/canceled 错误结束当前朗读
            ClientMessage::SpeechError { session, error }
                if error == "interrupted" || error == "canceled" =>
            {
                ClientInput::Native(session, NativeSpeechEvent::Cancelled)
            }
            ClientMessage::SpeechError { session, error } => {
                ClientInput::Native(session, NativeSpeechEvent::Failed(error))
            }
            ClientMessage::AudioEnded { session } => {
                ClientInput::Proxied(session, ProxiedAudioEvent::Ended)
            }
            ClientMessage::AudioError { session, error } => {
                ClientInput::Proxied(session, ProxiedAudioEvent::Failed(error))
            }
        }
    }
}
