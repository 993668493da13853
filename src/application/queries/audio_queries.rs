//! Audio Queries - 代理音频

/// 获取代理音频
#[derive(Debug, Clone)]
pub struct GetProxiedAudio {
    pub text: String,
    pub lang: String,
}

/// 代理音频响应
#[derive(Debug, Clone)]
pub struct ProxiedAudioResponse {
    pub audio_data: Vec<u8>,
    pub content_type: String,
    pub cached: bool,
}
