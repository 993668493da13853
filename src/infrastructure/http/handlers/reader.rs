//! Reader HTTP Handlers
//!
//! WebSocket 之外的控制入口：按 reader_id 驱动已打开的阅读会话

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{
    GetReaderHighlight, SpeakAllCommand, SpeakTokenCommand, StopReadingCommand,
};
use crate::infrastructure::http::dto::{
    ApiResponse, HighlightDto, ReaderAck, ReaderRequest, SpeakTokenRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn reader_speak_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeakTokenRequest>,
) -> Result<Json<ApiResponse<ReaderAck>>, ApiError> {
    let result = state
        .speak_token_handler
        .handle(SpeakTokenCommand {
            reader_id: req.reader_id,
            index: req.index,
        })
        .await?;
    Ok(Json(ApiResponse::success(ReaderAck {
        reader_id: result.reader_id,
    })))
}

pub async fn reader_speak_all(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReaderRequest>,
) -> Result<Json<ApiResponse<ReaderAck>>, ApiError> {
    let result = state
        .speak_all_handler
        .handle(SpeakAllCommand {
            reader_id: req.reader_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(ReaderAck {
        reader_id: result.reader_id,
    })))
}

pub async fn reader_stop(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReaderRequest>,
) -> Result<Json<ApiResponse<ReaderAck>>, ApiError> {
    let result = state
        .stop_reading_handler
        .handle(StopReadingCommand {
            reader_id: req.reader_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(ReaderAck {
        reader_id: result.reader_id,
    })))
}

pub async fn reader_highlight(
    State(state): State<Arc<AppState>>,
    Path(reader_id): Path<String>,
) -> Result<Json<ApiResponse<HighlightDto>>, ApiError> {
    let highlight = state
        .get_reader_highlight_handler
        .handle(GetReaderHighlight {
            reader_id: reader_id.clone(),
        })
        .await?;
    Ok(Json(ApiResponse::success(HighlightDto::new(
        reader_id, highlight,
    ))))
}
