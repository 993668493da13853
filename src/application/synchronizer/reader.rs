//! 阅读会话
//!
//! 每个打开的阅读页面对应一个后台任务，独占一个 [`Synchronizer`]；
//! 外部通过 [`ReaderHandle`] 投递命令与后端事件，通过 watch 通道观察高亮。

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::synchronizer::{Outcome, Synchronizer, SynchronizerConfig};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    NativeSpeechEvent, NativeSpeechPort, ProxiedAudioEvent, ProxiedAudioPort, SessionId,
};
use crate::domain::passage::Passage;
use crate::domain::HighlightState;

/// 用户命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderCommand {
    SpeakToken { index: usize },
    SpeakAll,
    Stop,
}

/// 阅读会话 inbox 中的输入
#[derive(Debug)]
pub enum ReaderInput {
    Command(ReaderCommand),
    Native {
        session: SessionId,
        event: NativeSpeechEvent,
    },
    Proxied {
        session: SessionId,
        event: ProxiedAudioEvent,
    },
    Tick(SessionId),
    FallbackElapsed(SessionId),
    Shutdown,
}

impl ReaderInput {
    fn kind(&self) -> &'static str {
        match self {
            ReaderInput::Command(ReaderCommand::SpeakToken { .. }) => "speak_token",
            ReaderInput::Command(ReaderCommand::SpeakAll) => "speak_all",
            ReaderInput::Command(ReaderCommand::Stop) => "stop",
            ReaderInput::Native { .. } => "native_event",
            ReaderInput::Proxied { .. } => "proxied_event",
            ReaderInput::Tick(_) => "tick",
            ReaderInput::FallbackElapsed(_) => "fallback",
            ReaderInput::Shutdown => "shutdown",
        }
    }
}

/// 阅读会话句柄
#[derive(Debug, Clone)]
pub struct ReaderHandle {
    reader_id: String,
    token_count: usize,
    inbox: mpsc::UnboundedSender<ReaderInput>,
    highlight: watch::Receiver<HighlightState>,
}

impl ReaderHandle {
    pub fn reader_id(&self) -> &str {
        &self.reader_id
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn speak_token(&self, index: usize) -> Result<(), ApplicationError> {
        if index >= self.token_count {
            return Err(ApplicationError::validation(format!(
                "Token index {} out of range (passage has {} tokens)",
                index, self.token_count
            )));
        }
        self.send(ReaderInput::Command(ReaderCommand::SpeakToken { index }))
    }

    pub fn speak_all(&self) -> Result<(), ApplicationError> {
        self.send(ReaderInput::Command(ReaderCommand::SpeakAll))
    }

    pub fn stop(&self) -> Result<(), ApplicationError> {
        self.send(ReaderInput::Command(ReaderCommand::Stop))
    }

    pub fn native_event(
        &self,
        session: SessionId,
        event: NativeSpeechEvent,
    ) -> Result<(), ApplicationError> {
        self.send(ReaderInput::Native { session, event })
    }

    pub fn proxied_event(
        &self,
        session: SessionId,
        event: ProxiedAudioEvent,
    ) -> Result<(), ApplicationError> {
        self.send(ReaderInput::Proxied { session, event })
    }

    /// 关闭阅读会话，停止所有播放
    pub fn shutdown(&self) {
        let _ = self.inbox.send(ReaderInput::Shutdown);
    }

    pub fn is_closed(&self) -> bool {
        self.inbox.is_closed()
    }

    /// 当前高亮
    pub fn highlight(&self) -> HighlightState {
        *self.highlight.borrow()
    }

    /// 订阅高亮变化
    pub fn subscribe(&self) -> watch::Receiver<HighlightState> {
        self.highlight.clone()
    }

    fn send(&self, input: ReaderInput) -> Result<(), ApplicationError> {
        self.inbox.send(input).map_err(|_| {
            ApplicationError::invalid_state(format!("Reader {} is closed", self.reader_id))
        })
    }
}

/// 启动阅读会话任务
pub fn spawn_reader(
    reader_id: impl Into<String>,
    passage: Passage,
    config: SynchronizerConfig,
    native: Arc<dyn NativeSpeechPort>,
    proxy: Arc<dyn ProxiedAudioPort>,
) -> (ReaderHandle, JoinHandle<()>) {
    let reader_id = reader_id.into();
    let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
    let (highlight_tx, highlight_rx) = watch::channel(HighlightState::IDLE);
    let token_count = passage.token_count();

    let synchronizer = Synchronizer::new(
        config,
        passage,
        native,
        proxy,
        highlight_tx,
        inbox_tx.downgrade(),
    );
    let task = tokio::spawn(run_reader(reader_id.clone(), synchronizer, inbox_rx));

    let handle = ReaderHandle {
        reader_id,
        token_count,
        inbox: inbox_tx,
        highlight: highlight_rx,
    };
    (handle, task)
}

async fn run_reader(
    reader_id: String,
    mut synchronizer: Synchronizer,
    mut inbox: mpsc::UnboundedReceiver<ReaderInput>,
) {
    tracing::info!(
        reader_id = %reader_id,
        passage_id = %synchronizer.passage().id(),
        "Reader started"
    );

    while let Some(input) = inbox.recv().await {
        if matches!(input, ReaderInput::Shutdown) {
            break;
        }
        let kind = input.kind();
        match synchronizer.handle(input) {
            Outcome::Applied => {}
            Outcome::Stale => {
                tracing::debug!(reader_id = %reader_id, input = kind, "Ignoring stale input");
            }
            Outcome::Rejected => {
                tracing::warn!(reader_id = %reader_id, input = kind, "Command rejected");
            }
            Outcome::Finished(reason) => {
                tracing::debug!(
                    reader_id = %reader_id,
                    reason = reason.as_str(),
                    "Playback session closed"
                );
            }
        }
    }

    synchronizer.stop();
    tracing::info!(reader_id = %reader_id, "Reader stopped");
}
