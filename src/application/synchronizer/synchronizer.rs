//! 朗读同步器
//!
//! 根据文本书写方向选择朗读后端，并保持单词高亮与音频一致：
//! - 本地语音合成：boundary 事件给出字符偏移，映射为 Token 下标
//! - 代理音频：没有进度信息，按固定间隔估算推进
//!
//! 所有输入（命令、后端事件、定时器）都在阅读会话的单个任务里串行处理，
//! 事件携带的 SessionId 与当前会话不符时直接丢弃。

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::sync::watch;

use super::reader::{ReaderCommand, ReaderInput};
use super::session::{PlaybackMode, PlaybackSession};
use super::timer::TimerHandle;
use crate::application::ports::{
    NativeSpeechEvent, NativeSpeechPort, PlaybackError, ProxiedAudioEvent, ProxiedAudioPort,
    SessionId, SpeechRequest,
};
use crate::domain::passage::{Language, Passage};
use crate::domain::{
    is_right_to_left_script, strip_hebrew_marks, token_index_for_offset, HighlightState,
};

/// 同步器配置
#[derive(Debug, Clone, Copy)]
pub struct SynchronizerConfig {
    /// 代理音频的逐词推进间隔
    pub word_interval: Duration,
    /// 代理音频缺少结束信号时的兜底宽限
    pub fallback_timeout: Duration,
}

impl Default for SynchronizerConfig {
    fn default() -> Self {
        Self {
            word_interval: Duration::from_millis(500),
            fallback_timeout: Duration::from_millis(8000),
        }
    }
}

/// 会话结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Ended,
    Cancelled,
    FallbackElapsed,
    Failed,
}

impl FinishReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinishReason::Ended => "ended",
            FinishReason::Cancelled => "cancelled",
            FinishReason::FallbackElapsed => "fallback_elapsed",
            FinishReason::Failed => "failed",
        }
    }
}

/// 单个输入的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// 属于已被替换的会话，忽略
    Stale,
    /// 命令参数无效，状态未变
    Rejected,
    Finished(FinishReason),
}

pub struct Synchronizer {
    config: SynchronizerConfig,
    passage: Passage,
    native: Arc<dyn NativeSpeechPort>,
    proxy: Arc<dyn ProxiedAudioPort>,
    session: PlaybackSession,
    last_session: u64,
    highlight: watch::Sender<HighlightState>,
    inbox: WeakUnboundedSender<ReaderInput>,
}

impl Synchronizer {
    pub fn new(
        config: SynchronizerConfig,
        passage: Passage,
        native: Arc<dyn NativeSpeechPort>,
        proxy: Arc<dyn ProxiedAudioPort>,
        highlight: watch::Sender<HighlightState>,
        inbox: WeakUnboundedSender<ReaderInput>,
    ) -> Self {
        Self {
            config,
            passage,
            native,
            proxy,
            session: PlaybackSession::Idle,
            last_session: 0,
            highlight,
            inbox,
        }
    }

    pub fn passage(&self) -> &Passage {
        &self.passage
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn highlight(&self) -> HighlightState {
        *self.highlight.borrow()
    }

    pub fn handle(&mut self, input: ReaderInput) -> Outcome {
        match input {
            ReaderInput::Command(ReaderCommand::SpeakToken { index }) => self.speak_token(index),
            ReaderInput::Command(ReaderCommand::SpeakAll) => self.speak_all(),
            ReaderInput::Command(ReaderCommand::Stop) | ReaderInput::Shutdown => self.stop(),
            ReaderInput::Native { session, event } => self.on_native_event(session, event),
            ReaderInput::Proxied { session, event } => self.on_proxied_event(session, event),
            ReaderInput::Tick(session) => self.on_tick(session),
            ReaderInput::FallbackElapsed(session) => self.on_fallback(session),
        }
    }

    /// 朗读单个单词
    ///
    /// 右到左文字走代理音频（去除元音符号），其他走本地合成
    pub fn speak_token(&mut self, index: usize) -> Outcome {
        let Some(token) = self.passage.token(index) else {
            tracing::warn!(
                index,
                token_count = self.passage.token_count(),
                "Token index out of range"
            );
            return Outcome::Rejected;
        };
        let text = token.text().to_string();

        self.teardown();
        self.publish(HighlightState::word(index));
        let id = self.next_session_id();

        if is_right_to_left_script(&text) {
            let request = SpeechRequest {
                session: id,
                text: proxy_text(&text),
                language_tag: Language::Hebrew.code().to_string(),
            };
            if let Err(e) = self.proxy.play(request) {
                return self.fail(id, e);
            }
            self.session = PlaybackSession::Streaming {
                id,
                mode: PlaybackMode::Word,
                ticker: None,
                fallback: Some(TimerHandle::fallback(
                    id,
                    self.config.fallback_timeout,
                    self.inbox.clone(),
                )),
            };
            tracing::debug!(session = %id, index, "Word sent to proxied audio");
        } else {
            let request = SpeechRequest {
                session: id,
                text,
                language_tag: self.native_language_tag(),
            };
            if let Err(e) = self.native.speak(request) {
                return self.fail(id, e);
            }
            self.session = PlaybackSession::Speaking {
                id,
                mode: PlaybackMode::Word,
            };
            tracing::debug!(session = %id, index, "Word sent to native speech");
        }

        Outcome::Applied
    }

    /// 从头朗读全文
    pub fn speak_all(&mut self) -> Outcome {
        self.teardown();

        let token_count = self.passage.token_count();
        if token_count == 0 {
            self.publish(HighlightState::IDLE);
            tracing::debug!("Passage has no tokens, nothing to read");
            return Outcome::Applied;
        }

        self.publish(HighlightState::playing_all(0));
        let id = self.next_session_id();

        if self.passage.is_right_to_left() {
            let request = SpeechRequest {
                session: id,
                text: proxy_text(self.passage.body()),
                language_tag: Language::Hebrew.code().to_string(),
            };
            if let Err(e) = self.proxy.play(request) {
                return self.fail(id, e);
            }
            let ticker = (token_count > 1).then(|| {
                TimerHandle::ticker(id, self.config.word_interval, self.inbox.clone())
            });
            let fallback =
                TimerHandle::fallback(id, self.passage_fallback_delay(), self.inbox.clone());
            self.session = PlaybackSession::Streaming {
                id,
                mode: PlaybackMode::Passage,
                ticker,
                fallback: Some(fallback),
            };
            tracing::info!(session = %id, token_count, "Reading passage via proxied audio");
        } else {
            let request = SpeechRequest {
                session: id,
                text: self.passage.body().to_string(),
                language_tag: self.native_language_tag(),
            };
            if let Err(e) = self.native.speak(request) {
                return self.fail(id, e);
            }
            self.session = PlaybackSession::Speaking {
                id,
                mode: PlaybackMode::Passage,
            };
            tracing::info!(session = %id, token_count, "Reading passage via native speech");
        }

        Outcome::Applied
    }

    /// 停止一切播放并清除高亮
    pub fn stop(&mut self) -> Outcome {
        if let Some(id) = self.session.id() {
            tracing::info!(session = %id, "Playback stopped");
        }
        self.teardown();
        self.publish(HighlightState::IDLE);
        Outcome::Applied
    }

    fn on_native_event(&mut self, session: SessionId, event: NativeSpeechEvent) -> Outcome {
        let mode = match self.session {
            PlaybackSession::Speaking { id, mode } if id == session => mode,
            _ => return Outcome::Stale,
        };

        match event {
            NativeSpeechEvent::Started => Outcome::Applied,
            NativeSpeechEvent::Boundary { char_index } => {
                if mode == PlaybackMode::Passage {
                    if let Some(index) = token_index_for_offset(self.passage.tokens(), char_index)
                    {
                        self.publish(HighlightState::playing_all(index));
                    }
                }
                Outcome::Applied
            }
            NativeSpeechEvent::Ended => self.finish(FinishReason::Ended),
            NativeSpeechEvent::Cancelled => self.finish(FinishReason::Cancelled),
            NativeSpeechEvent::Failed(message) => {
                self.fail(session, PlaybackError::NativeSpeech(message))
            }
        }
    }

    fn on_proxied_event(&mut self, session: SessionId, event: ProxiedAudioEvent) -> Outcome {
        if !self.is_streaming(session) {
            return Outcome::Stale;
        }

        match event {
            ProxiedAudioEvent::Ended => self.finish(FinishReason::Ended),
            ProxiedAudioEvent::Failed(message) => {
                self.fail(session, PlaybackError::ProxiedAudio(message))
            }
        }
    }

    /// 估算推进一个单词，到达最后一个单词后停止定时器
    fn on_tick(&mut self, session: SessionId) -> Outcome {
        let ticking = matches!(
            &self.session,
            PlaybackSession::Streaming { id, ticker: Some(_), .. } if *id == session
        );
        if !ticking {
            return Outcome::Stale;
        }

        let last = self.passage.token_count().saturating_sub(1);
        let current = self.highlight().active_index.unwrap_or(0);
        let next = if current < last { current + 1 } else { last };
        self.publish(HighlightState::playing_all(next));

        if next >= last {
            if let PlaybackSession::Streaming { ticker, .. } = &mut self.session {
                ticker.take();
            }
            tracing::debug!(session = %session, "Highlight reached last token");
        }

        Outcome::Applied
    }

    fn on_fallback(&mut self, session: SessionId) -> Outcome {
        if !self.is_streaming(session) {
            return Outcome::Stale;
        }
        tracing::debug!(session = %session, "No end signal from proxied audio, settling");
        self.finish(FinishReason::FallbackElapsed)
    }

    /// 会话自然结束：全文模式清除高亮，单词模式保留被点读的单词
    fn finish(&mut self, reason: FinishReason) -> Outcome {
        let finished = std::mem::take(&mut self.session);
        self.release_proxy(&finished);
        if finished.mode() == Some(PlaybackMode::Passage) {
            self.publish(HighlightState::IDLE);
        }
        if let Some(id) = finished.id() {
            tracing::debug!(session = %id, reason = reason.as_str(), "Playback finished");
        }
        Outcome::Finished(reason)
    }

    /// 播放失败不影响阅读：记录日志并回到空闲
    fn fail(&mut self, session: SessionId, error: PlaybackError) -> Outcome {
        tracing::warn!(session = %session, error = %error, "Playback failed");
        let failed = std::mem::take(&mut self.session);
        self.release_proxy(&failed);
        self.publish(HighlightState::IDLE);
        Outcome::Finished(FinishReason::Failed)
    }

    /// 代理音频会话结束时卸载音频元素，下一次 play 前不留旧音频
    fn release_proxy(&self, session: &PlaybackSession) {
        if matches!(session, PlaybackSession::Streaming { .. }) {
            self.proxy.pause_and_unload();
        }
    }

    /// 停止当前后端并清除挂起的定时器
    fn teardown(&mut self) {
        match std::mem::take(&mut self.session) {
            PlaybackSession::Idle => {}
            PlaybackSession::Speaking { .. } => self.native.cancel(),
            PlaybackSession::Streaming {
                ticker, fallback, ..
            } => {
                drop(ticker);
                drop(fallback);
                self.proxy.pause_and_unload();
            }
        }
    }

    fn is_streaming(&self, session: SessionId) -> bool {
        matches!(&self.session, PlaybackSession::Streaming { id, .. } if *id == session)
    }

    fn next_session_id(&mut self) -> SessionId {
        self.last_session += 1;
        SessionId::new(self.last_session)
    }

    /// 本地合成的语言标签；右到左文章中的其他文字按英语朗读
    fn native_language_tag(&self) -> String {
        let language = self.passage.language();
        if language.is_right_to_left() {
            Language::English.speech_tag()
        } else {
            language.speech_tag()
        }
    }

    fn passage_fallback_delay(&self) -> Duration {
        let words = u32::try_from(self.passage.token_count()).unwrap_or(u32::MAX);
        self.config
            .word_interval
            .saturating_mul(words)
            .saturating_add(self.config.fallback_timeout)
    }

    fn publish(&self, state: HighlightState) {
        self.highlight.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }
}

impl Drop for Synchronizer {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// 代理音频的请求文本：去除尼古德/吟诵符号并压缩空白
fn proxy_text(text: &str) -> String {
    strip_hebrew_marks(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::passage::{PassageId, Title};
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    /// 记录所有后端调用的假音频输出
    #[derive(Default)]
    struct RecordingAudio {
        calls: Mutex<Vec<String>>,
        requests: Mutex<Vec<SpeechRequest>>,
        fail_play: bool,
    }

    impl RecordingAudio {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn requests(&self) -> Vec<SpeechRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl NativeSpeechPort for RecordingAudio {
        fn speak(&self, request: SpeechRequest) -> Result<(), PlaybackError> {
            self.calls.lock().unwrap().push(format!("speak:{}", request.text));
            self.requests.lock().unwrap().push(request);
            Ok(())
        }

        fn cancel(&self) {
            self.calls.lock().unwrap().push("cancel".to_string());
        }
    }

    impl ProxiedAudioPort for RecordingAudio {
        fn play(&self, request: SpeechRequest) -> Result<(), PlaybackError> {
            if self.fail_play {
                return Err(PlaybackError::ProxiedAudio("network".to_string()));
            }
            self.calls.lock().unwrap().push(format!("play:{}", request.text));
            self.requests.lock().unwrap().push(request);
            Ok(())
        }

        fn pause_and_unload(&self) {
            self.calls.lock().unwrap().push("unload".to_string());
        }
    }

    struct Harness {
        sync: Synchronizer,
        audio: Arc<RecordingAudio>,
        inbox: mpsc::UnboundedReceiver<ReaderInput>,
        _tx: mpsc::UnboundedSender<ReaderInput>,
    }

    fn harness_with(body: &str, language: Language, audio: RecordingAudio) -> Harness {
        let passage = Passage::new(
            PassageId::new(1),
            Title::new("Test").unwrap(),
            body.to_string(),
            language,
            None,
            None,
        );
        let audio = Arc::new(audio);
        let (tx, inbox) = mpsc::unbounded_channel();
        let (highlight, _) = watch::channel(HighlightState::IDLE);
        let sync = Synchronizer::new(
            SynchronizerConfig::default(),
            passage,
            audio.clone(),
            audio.clone(),
            highlight,
            tx.downgrade(),
        );
        Harness {
            sync,
            audio,
            inbox,
            _tx: tx,
        }
    }

    fn harness(body: &str, language: Language) -> Harness {
        harness_with(body, language, RecordingAudio::default())
    }

    fn last_session(audio: &RecordingAudio) -> SessionId {
        audio.requests().last().unwrap().session
    }

    #[tokio::test]
    async fn test_native_passage_follows_boundaries() {
        let mut h = harness("Hello brave world", Language::English);

        assert_eq!(h.sync.speak_all(), Outcome::Applied);
        assert_eq!(h.sync.highlight(), HighlightState::playing_all(0));

        let request = h.audio.requests().remove(0);
        assert_eq!(request.text, "Hello brave world");
        assert_eq!(request.language_tag, "en-US");

        let session = request.session;
        let boundary = |char_index| ReaderInput::Native {
            session,
            event: NativeSpeechEvent::Boundary { char_index },
        };
        h.sync.handle(boundary(6));
        assert_eq!(h.sync.highlight(), HighlightState::playing_all(1));
        h.sync.handle(boundary(12));
        assert_eq!(h.sync.highlight(), HighlightState::playing_all(2));

        let outcome = h.sync.handle(ReaderInput::Native {
            session,
            event: NativeSpeechEvent::Ended,
        });
        assert_eq!(outcome, Outcome::Finished(FinishReason::Ended));
        assert!(h.sync.highlight().is_idle());
        assert!(h.sync.session().is_idle());
    }

    #[tokio::test]
    async fn test_speak_all_twice_ignores_stale_end() {
        let mut h = harness("one two three", Language::English);

        h.sync.speak_all();
        let first = last_session(&h.audio);
        h.sync.speak_all();
        let second = last_session(&h.audio);
        assert_ne!(first, second);
        assert_eq!(
            h.audio.calls(),
            vec!["speak:one two three", "cancel", "speak:one two three"]
        );

        let mut finished = 0;
        for session in [first, second] {
            let outcome = h.sync.handle(ReaderInput::Native {
                session,
                event: NativeSpeechEvent::Ended,
            });
            if outcome == Outcome::Finished(FinishReason::Ended) {
                finished += 1;
            }
        }
        assert_eq!(finished, 1);
        assert!(h.sync.highlight().is_idle());
    }

    #[tokio::test]
    async fn test_stale_boundary_does_not_move_highlight() {
        let mut h = harness("one two three", Language::English);

        h.sync.speak_all();
        let first = last_session(&h.audio);
        h.sync.speak_token(2);

        let outcome = h.sync.handle(ReaderInput::Native {
            session: first,
            event: NativeSpeechEvent::Boundary { char_index: 4 },
        });
        assert_eq!(outcome, Outcome::Stale);
        assert_eq!(h.sync.highlight(), HighlightState::word(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_proxy_timer_advances_and_holds_at_last() {
        let mut h = harness("אחת שתיים שלוש ארבע חמש", Language::Hebrew);

        h.sync.speak_all();
        let mut observed = vec![h.sync.highlight().active_index.unwrap()];
        for _ in 0..4 {
            let input = h.inbox.recv().await.unwrap();
            assert!(matches!(input, ReaderInput::Tick(_)));
            assert_eq!(h.sync.handle(input), Outcome::Applied);
            observed.push(h.sync.highlight().active_index.unwrap());
        }
        assert_eq!(observed, vec![0, 1, 2, 3, 4]);
        assert!(!h.sync.session().is_ticking());

        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert!(h.inbox.try_recv().is_err());
        assert_eq!(h.sync.highlight(), HighlightState::playing_all(4));

        // 没有结束信号时由兜底定时器收尾
        let input = h.inbox.recv().await.unwrap();
        assert!(matches!(input, ReaderInput::FallbackElapsed(_)));
        assert_eq!(
            h.sync.handle(input),
            Outcome::Finished(FinishReason::FallbackElapsed)
        );
        assert!(h.sync.highlight().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hebrew_greeting_reads_via_proxy() {
        let mut h = harness("שָׁלוֹם עוֹלָם", Language::Hebrew);

        h.sync.speak_all();
        let requests = h.audio.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].text, "שלום עולם");
        assert_eq!(requests[0].language_tag, "he");
        assert!(h.audio.calls()[0].starts_with("play:"));
        assert_eq!(h.sync.highlight(), HighlightState::playing_all(0));

        let tick = h.inbox.recv().await.unwrap();
        h.sync.handle(tick);
        assert_eq!(h.sync.highlight(), HighlightState::playing_all(1));
        assert!(!h.sync.session().is_ticking());

        let outcome = h.sync.handle(ReaderInput::Proxied {
            session: requests[0].session,
            event: ProxiedAudioEvent::Ended,
        });
        assert_eq!(outcome, Outcome::Finished(FinishReason::Ended));
        assert!(h.sync.highlight().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_during_proxy_passage_cancels_timers() {
        let mut h = harness("אחת שתיים שלוש", Language::Hebrew);

        h.sync.speak_all();
        let session = last_session(&h.audio);
        assert_eq!(h.sync.stop(), Outcome::Applied);
        assert_eq!(h.audio.calls().last().unwrap(), "unload");
        assert!(h.sync.highlight().is_idle());

        tokio::time::advance(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;
        assert!(h.inbox.try_recv().is_err());

        assert_eq!(h.sync.handle(ReaderInput::Tick(session)), Outcome::Stale);
        assert!(h.sync.highlight().is_idle());
    }

    #[tokio::test]
    async fn test_stop_without_session_is_noop() {
        let mut h = harness("one two", Language::English);

        assert_eq!(h.sync.stop(), Outcome::Applied);
        assert!(h.audio.calls().is_empty());
        assert!(h.sync.highlight().is_idle());
        assert!(h.sync.session().is_idle());
    }

    #[tokio::test]
    async fn test_speak_token_on_mixed_passage_picks_backend_per_word() {
        let mut h = harness("שלום world", Language::Hebrew);

        h.sync.speak_token(0);
        assert_eq!(h.sync.highlight(), HighlightState::word(0));
        assert!(matches!(
            h.sync.session(),
            PlaybackSession::Streaming { ticker: None, fallback: Some(_), .. }
        ));

        h.sync.speak_token(1);
        assert_eq!(h.sync.highlight(), HighlightState::word(1));
        let request = h.audio.requests().pop().unwrap();
        assert_eq!(request.text, "world");
        assert_eq!(request.language_tag, "en-US");
        assert_eq!(h.audio.calls(), vec!["play:שלום", "unload", "speak:world"]);
    }

    #[tokio::test]
    async fn test_consecutive_proxied_words_unload_previous_first() {
        let mut h = harness("אחת שתיים", Language::Hebrew);

        h.sync.speak_token(0);
        h.sync.speak_token(1);
        assert_eq!(h.audio.calls(), vec!["play:אחת", "unload", "play:שתיים"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_word_after_fallback_unloads_before_play() {
        let mut h = harness("אחת שתיים", Language::Hebrew);

        h.sync.speak_token(0);
        let input = h.inbox.recv().await.unwrap();
        assert!(matches!(input, ReaderInput::FallbackElapsed(_)));
        assert_eq!(
            h.sync.handle(input),
            Outcome::Finished(FinishReason::FallbackElapsed)
        );
        assert_eq!(h.sync.highlight(), HighlightState::word(0));

        h.sync.speak_token(1);
        assert_eq!(h.audio.calls(), vec!["play:אחת", "unload", "play:שתיים"]);
    }

    #[tokio::test]
    async fn test_proxied_end_and_failure_unload() {
        let mut h = harness("אחת שתיים", Language::Hebrew);

        h.sync.speak_all();
        let session = last_session(&h.audio);
        h.sync.handle(ReaderInput::Proxied {
            session,
            event: ProxiedAudioEvent::Ended,
        });
        assert_eq!(h.audio.calls().last().unwrap(), "unload");

        h.sync.speak_token(1);
        let session = last_session(&h.audio);
        let outcome = h.sync.handle(ReaderInput::Proxied {
            session,
            event: ProxiedAudioEvent::Failed("decode".to_string()),
        });
        assert_eq!(outcome, Outcome::Finished(FinishReason::Failed));
        assert_eq!(
            h.audio.calls(),
            vec!["play:אחת שתיים", "unload", "play:שתיים", "unload"]
        );
        assert!(h.sync.highlight().is_idle());
    }

    #[tokio::test]
    async fn test_native_end_does_not_touch_proxy() {
        let mut h = harness("one two", Language::English);

        h.sync.speak_all();
        let session = last_session(&h.audio);
        h.sync.handle(ReaderInput::Native {
            session,
            event: NativeSpeechEvent::Ended,
        });
        assert_eq!(h.audio.calls(), vec!["speak:one two"]);
    }

    #[tokio::test]
    async fn test_word_end_keeps_highlight() {
        let mut h = harness("bonjour le monde", Language::French);

        h.sync.speak_token(2);
        let request = h.audio.requests().pop().unwrap();
        assert_eq!(request.language_tag, "fr-FR");

        let outcome = h.sync.handle(ReaderInput::Native {
            session: request.session,
            event: NativeSpeechEvent::Ended,
        });
        assert_eq!(outcome, Outcome::Finished(FinishReason::Ended));
        assert_eq!(h.sync.highlight(), HighlightState::word(2));
        assert!(h.sync.session().is_idle());
    }

    #[tokio::test]
    async fn test_word_boundary_does_not_move_highlight() {
        let mut h = harness("one two", Language::English);

        h.sync.speak_token(1);
        let session = last_session(&h.audio);
        h.sync.handle(ReaderInput::Native {
            session,
            event: NativeSpeechEvent::Boundary { char_index: 0 },
        });
        assert_eq!(h.sync.highlight(), HighlightState::word(1));
    }

    #[tokio::test]
    async fn test_out_of_range_token_is_rejected() {
        let mut h = harness("one two", Language::English);

        h.sync.speak_all();
        assert_eq!(h.sync.speak_token(7), Outcome::Rejected);
        assert_eq!(h.audio.calls(), vec!["speak:one two"]);
        assert_eq!(h.sync.highlight(), HighlightState::playing_all(0));
    }

    #[tokio::test]
    async fn test_empty_passage_settles_idle() {
        let mut h = harness("   ", Language::English);

        assert_eq!(h.sync.speak_all(), Outcome::Applied);
        assert!(h.audio.calls().is_empty());
        assert!(h.sync.highlight().is_idle());
        assert!(h.sync.session().is_idle());
    }

    #[tokio::test]
    async fn test_proxy_play_failure_returns_to_idle() {
        let audio = RecordingAudio {
            fail_play: true,
            ..Default::default()
        };
        let mut h = harness_with("שלום עולם", Language::Hebrew, audio);

        assert_eq!(h.sync.speak_all(), Outcome::Finished(FinishReason::Failed));
        assert!(h.sync.highlight().is_idle());
        assert!(h.sync.session().is_idle());
    }

    #[tokio::test]
    async fn test_native_failure_event_returns_to_idle() {
        let mut h = harness("one two", Language::English);

        h.sync.speak_all();
        let session = last_session(&h.audio);
        let outcome = h.sync.handle(ReaderInput::Native {
            session,
            event: NativeSpeechEvent::Failed("synthesis-failed".to_string()),
        });
        assert_eq!(outcome, Outcome::Finished(FinishReason::Failed));
        assert!(h.sync.highlight().is_idle());
    }

    #[tokio::test]
    async fn test_proxied_event_for_native_session_is_stale() {
        let mut h = harness("one two", Language::English);

        h.sync.speak_all();
        let session = last_session(&h.audio);
        let outcome = h.sync.handle(ReaderInput::Proxied {
            session,
            event: ProxiedAudioEvent::Ended,
        });
        assert_eq!(outcome, Outcome::Stale);
        assert_eq!(h.sync.highlight(), HighlightState::playing_all(0));
    }
}
