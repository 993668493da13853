//! Reader WebSocket Handler
//!
//! 一个连接对应一个阅读会话：
//! - 服务端推送高亮变化与播放指令（ReaderEvent）
//! - 客户端回传用户命令与浏览器音频事件（ClientMessage）
//! - 连接断开即拆除同步器

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::{
    ApplicationError, CloseReaderCommand, OpenReaderCommand, ReaderHandle,
};
use crate::infrastructure::adapters::ClientAudioBridge;
use crate::infrastructure::events::{ClientInput, ClientMessage, ReaderEvent};
use crate::infrastructure::http::dto::PassageDto;
use crate::infrastructure::http::state::AppState;

pub async fn reader_websocket_handler(
    ws: WebSocketUpgrade,
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_reader_socket(socket, slug, state))
}

fn encode(event: &ReaderEvent) -> Option<Message> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Message::Text(json)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize reader event");
            None
        }
    }
}

async fn handle_reader_socket(socket: WebSocket, slug: String, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<ReaderEvent>();

    let bridge = Arc::new(ClientAudioBridge::new(
        outbound_tx.clone(),
        &state.settings.public_base_url,
    ));
    let opened = match state
        .open_reader_handler
        .handle(OpenReaderCommand {
            slug: slug.clone(),
            native: bridge.clone(),
            proxy: bridge,
        })
        .await
    {
        Ok(opened) => opened,
        Err(e) => {
            let event = match e {
                ApplicationError::NotFound { .. } => {
                    tracing::warn!(slug = %slug, "Reader rejected: passage not found");
                    ReaderEvent::PassageNotFound { slug }
                }
                other => {
                    tracing::error!(slug = %slug, error = %other, "Failed to open reader");
                    ReaderEvent::Error {
                        message: other.to_string(),
                    }
                }
            };
            if let Some(msg) = encode(&event) {
                let _ = sender.send(msg).await;
            }
            let _ = sender.close().await;
            return;
        }
    };

    let reader_id = opened.reader_id.clone();
    let handle = opened.handle;
    let _ = outbound_tx.send(ReaderEvent::PassageLoaded {
        reader_id: reader_id.clone(),
        passage: PassageDto::from(&opened.passage),
        tokens: opened.passage.tokens().to_vec(),
        rtl: opened.passage.is_right_to_left(),
    });

    tracing::info!(reader_id = %reader_id, slug = %slug, "Reader WebSocket connected");

    // 高亮变化 -> 客户端
    let mut highlight = handle.subscribe();
    let highlight_tx = outbound_tx.clone();
    let highlight_task = tokio::spawn(async move {
        while highlight.changed().await.is_ok() {
            let current = *highlight.borrow_and_update();
            if highlight_tx.send(ReaderEvent::from(current)).is_err() {
                break;
            }
        }
    });

    // 事件转发任务
    let forward_reader_id = reader_id.clone();
    let forward_task = tokio::spawn(async move {
        while let Some(event) = outbound_rx.recv().await {
            let Some(msg) = encode(&event) else {
                continue;
            };
            if let Err(e) = sender.send(msg).await {
                tracing::debug!(
                    reader_id = %forward_reader_id,
                    error = %e,
                    "Failed to send WebSocket message"
                );
                break;
            }
        }
    });

    let autoplay_task = state.settings.autoplay_delay.map(|delay| {
        let handle = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = handle.speak_all() {
                tracing::debug!(reader_id = %handle.reader_id(), error = %e, "Autoplay skipped");
            }
        })
    });

    // 接收客户端消息
    let receive_reader_id = reader_id.clone();
    let receive_tx = outbound_tx.clone();
    let receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if let Err(e) = dispatch(&handle, &text) {
                        tracing::debug!(
                            reader_id = %receive_reader_id,
                            error = %e,
                            "Client message rejected"
                        );
                        let _ = receive_tx.send(ReaderEvent::Error {
                            message: e.to_string(),
                        });
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(reader_id = %receive_reader_id, "WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(reader_id = %receive_reader_id, error = %e, "WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    });
    drop(outbound_tx);

    // 等待任一任务完成
    let aborts = [
        highlight_task.abort_handle(),
        forward_task.abort_handle(),
        receive_task.abort_handle(),
    ];
    tokio::select! {
        _ = forward_task => {}
        _ = receive_task => {}
    }

    // 清理
    for abort in aborts {
        abort.abort();
    }
    if let Some(task) = autoplay_task {
        task.abort();
    }
    if let Err(e) = state
        .close_reader_handler
        .handle(CloseReaderCommand {
            reader_id: reader_id.clone(),
        })
        .await
    {
        tracing::warn!(reader_id = %reader_id, error = %e, "Failed to close reader");
    }
    tracing::info!(reader_id = %reader_id, "Reader WebSocket disconnected");
}

/// 将客户端消息投递给阅读会话
fn dispatch(handle: &ReaderHandle, text: &str) -> Result<(), ApplicationError> {
    let message: ClientMessage = serde_json::from_str(text)
        .map_err(|e| ApplicationError::validation(format!("Invalid client message: {}", e)))?;

    match ClientInput::from(message) {
        ClientInput::SpeakToken(index) => handle.speak_token(index),
        ClientInput::SpeakAll => handle.speak_all(),
        ClientInput::Stop => handle.stop(),
        ClientInput::Native(session, event) => handle.native_event(session, event),
        ClientInput::Proxied(session, event) => handle.proxied_event(session, event),
        ClientInput::Ignored => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        spawn_reader, NativeSpeechPort, PlaybackError, ProxiedAudioPort, SpeechRequest,
        SynchronizerConfig,
    };
    use crate::domain::passage::{Language, Passage, PassageId, Title};
    use crate::domain::HighlightState;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<SpeechRequest>>);

    impl NativeSpeechPort for Recorder {
        fn speak(&self, request: SpeechRequest) -> Result<(), PlaybackError> {
            self.0.lock().unwrap().push(request);
            Ok(())
        }
        fn cancel(&self) {}
    }

    impl ProxiedAudioPort for Recorder {
        fn play(&self, request: SpeechRequest) -> Result<(), PlaybackError> {
            self.0.lock().unwrap().push(request);
            Ok(())
        }
        fn pause_and_unload(&self) {}
    }

    fn reader(body: &str) -> (ReaderHandle, Arc<Recorder>) {
        let passage = Passage::new(
            PassageId::new(1),
            Title::new("Psalm").unwrap(),
            body,
            Language::English,
            None,
            None,
        );
        let audio = Arc::new(Recorder::default());
        let (handle, _task) = spawn_reader(
            "ws-reader",
            passage,
            SynchronizerConfig::default(),
            audio.clone(),
            audio.clone(),
        );
        (handle, audio)
    }

    #[tokio::test]
    async fn test_dispatch_drives_reader() {
        let (handle, audio) = reader("The Lord is my shepherd");
        let mut highlight = handle.subscribe();

        dispatch(&handle, r#"{"type": "speak_all"}"#).unwrap();
        highlight.changed().await.unwrap();
        assert_eq!(*highlight.borrow(), HighlightState::playing_all(0));

        let session = audio.0.lock().unwrap()[0].session;
        let boundary = format!(
            r#"{{"type": "speech_boundary", "session": {}, "char_index": 9, "name": "word"}}"#,
            session.value()
        );
        dispatch(&handle, &boundary).unwrap();
        highlight.changed().await.unwrap();
        assert_eq!(*highlight.borrow(), HighlightState::playing_all(2));

        dispatch(&handle, r#"{"type": "stop"}"#).unwrap();
        highlight.changed().await.unwrap();
        assert!(highlight.borrow().is_idle());
    }

    #[tokio::test]
    async fn test_dispatch_rejects_bad_input() {
        let (handle, _audio) = reader("one two");

        let err = dispatch(&handle, "not json").unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));

        let err = dispatch(&handle, r#"{"type": "speak_token", "index": 9}"#).unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));

        // sentence boundary 被忽略
        dispatch(
            &handle,
            r#"{"type": "speech_boundary", "session": 1, "char_index": 0, "name": "sentence"}"#,
        )
        .unwrap();
    }
}
