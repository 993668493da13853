//! Proxy Audio Handler
//!
//! 浏览器不支持目标语言的本地语音时，由服务端转发远端 TTS 音频
//!
//! 调用方是 `<audio>` 元素，失败时返回真实的 4xx/5xx 状态码

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::application::{ApplicationError, GetProxiedAudio};
use crate::infrastructure::http::dto::ProxyAudioParams;
use crate::infrastructure::http::error::{ApiError, StatusError};
use crate::infrastructure::http::state::AppState;

pub const PROXY_AUDIO_CACHE_CONTROL: &str = "public, max-age=3600";

pub async fn proxy_audio(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProxyAudioParams>,
) -> Result<Response, StatusError> {
    let text = params
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing text".to_string()))?;

    let result = state
        .get_proxied_audio_handler
        .handle(GetProxiedAudio {
            text,
            lang: params.tl,
        })
        .await
        .map_err(|e| match e {
            // 上游失败按服务端错误返回
            ApplicationError::ExternalServiceError(msg) => {
                ApiError::Internal(format!("Failed to fetch audio: {}", msg))
            }
            other => ApiError::from(other),
        })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(header::CONTENT_LENGTH, result.audio_data.len())
        .header(header::CACHE_CONTROL, PROXY_AUDIO_CACHE_CONTROL)
        .body(Body::from(result.audio_data))
        .map_err(|e| ApiError::Internal(e.to_string()).into())
}
