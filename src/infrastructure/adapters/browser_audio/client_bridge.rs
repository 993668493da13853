//! Client Audio Bridge
//!
//! 语音合成与音频播放发生在浏览器中：同步器下发的指令转换为
//! ReaderEvent 推送给 WebSocket 连接，浏览器的回调再经由 ClientMessage 回传。

use reqwest::Url;
use tokio::sync::mpsc;

use crate::application::ports::{
    NativeSpeechPort, PlaybackError, ProxiedAudioPort, SpeechRequest,
};
use crate::infrastructure::events::ReaderEvent;

pub struct ClientAudioBridge {
    outbound: mpsc::UnboundedSender<ReaderEvent>,
    audio_endpoint: String,
}

impl ClientAudioBridge {
    /// `public_base_url` 用于拼出浏览器可访问的代理音频地址
    pub fn new(outbound: mpsc::UnboundedSender<ReaderEvent>, public_base_url: &str) -> Self {
        Self {
            outbound,
            audio_endpoint: format!("{}/api/proxy-audio", public_base_url.trim_end_matches('/')),
        }
    }

    fn audio_url(&self, text: &str, lang: &str) -> Result<String, PlaybackError> {
        Url::parse_with_params(&self.audio_endpoint, &[("q", text), ("tl", lang)])
            .map(String::from)
            .map_err(|e| PlaybackError::ProxiedAudio(e.to_string()))
    }

    fn send(&self, event: ReaderEvent) -> Result<(), PlaybackError> {
        self.outbound
            .send(event)
            .map_err(|_| PlaybackError::Disconnected)
    }
}

impl NativeSpeechPort for ClientAudioBridge {
    fn speak(&self, request: SpeechRequest) -> Result<(), PlaybackError> {
        self.send(ReaderEvent::Speak {
            session: request.session,
            text: request.text,
            lang: request.language_tag,
        })
    }

    fn cancel(&self) {
        let _ = self.send(ReaderEvent::CancelSpeech);
    }
}

impl ProxiedAudioPort for ClientAudioBridge {
    fn play(&self, request: SpeechRequest) -> Result<(), PlaybackError> {
        let url = self.audio_url(&request.text, &request.language_tag)?;
        self.send(ReaderEvent::PlayAudio {
            session: request.session,
            url,
        })
    }

    fn pause_and_unload(&self) {
        let _ = self.send(ReaderEvent::StopAudio);
    }
}
