//! Lookup HTTP Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::{DictionaryEntry, LookupDictionary, LookupResult, LookupWord};
use crate::infrastructure::http::dto::{ApiResponse, LookupParams};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 仅查词典，未命中时 translation 为 null
pub async fn lookup_dictionary(
    State(state): State<Arc<AppState>>,
    Path(word): Path<String>,
) -> Result<Json<ApiResponse<DictionaryEntry>>, ApiError> {
    let entry = state
        .lookup_dictionary_handler
        .handle(LookupDictionary { word })
        .await?;
    Ok(Json(ApiResponse::success(entry)))
}

/// 查词典，未命中则走在线翻译
pub async fn lookup_word(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupParams>,
) -> Result<Json<ApiResponse<LookupResult>>, ApiError> {
    let word = params
        .word
        .filter(|w| !w.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing word".to_string()))?;

    let result = state
        .lookup_word_handler
        .handle(LookupWord {
            word,
            language: params.lang,
        })
        .await?;
    Ok(Json(ApiResponse::success(result)))
}
