//! Reader Commands - 阅读会话相关命令

use std::sync::Arc;

use crate::application::ports::{NativeSpeechPort, ProxiedAudioPort};
use crate::application::synchronizer::ReaderHandle;
use crate::domain::passage::Passage;

/// 打开阅读会话命令 - 加载文章并启动同步器
///
/// 音频后端由调用方（连接）提供，事件经由返回的句柄回传
#[derive(Clone)]
pub struct OpenReaderCommand {
    pub slug: String,
    pub native: Arc<dyn NativeSpeechPort>,
    pub proxy: Arc<dyn ProxiedAudioPort>,
}

/// 打开阅读会话响应
#[derive(Debug, Clone)]
pub struct OpenReaderResponse {
    pub reader_id: String,
    pub passage: Passage,
    pub handle: ReaderHandle,
}

/// 关闭阅读会话命令
#[derive(Debug, Clone)]
pub struct CloseReaderCommand {
    pub reader_id: String,
}

/// 点读单词命令
#[derive(Debug, Clone)]
pub struct SpeakTokenCommand {
    pub reader_id: String,
    pub index: usize,
}

/// 朗读全文命令
#[derive(Debug, Clone)]
pub struct SpeakAllCommand {
    pub reader_id: String,
}

/// 停止朗读命令
#[derive(Debug, Clone)]
pub struct StopReadingCommand {
    pub reader_id: String,
}

/// 阅读控制命令响应
#[derive(Debug, Clone)]
pub struct ReaderCommandResponse {
    pub reader_id: String,
}
