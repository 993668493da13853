//! Passage HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{
    GetPassageById, GetPassageBySlug, ListFeaturedPassages, PassageSummary,
};
use crate::infrastructure::http::dto::{ApiResponse, PassageDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 首页推荐文章
pub async fn list_featured_passages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PassageSummary>>>, ApiError> {
    let passages = state
        .list_featured_handler
        .handle(ListFeaturedPassages::default())
        .await?;
    Ok(Json(ApiResponse::success(passages)))
}

pub async fn get_passage_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<PassageDto>>, ApiError> {
    let passage = state
        .get_passage_by_slug_handler
        .handle(GetPassageBySlug { slug })
        .await?;
    Ok(Json(ApiResponse::success(PassageDto::from(&passage))))
}

pub async fn get_passage_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PassageDto>>, ApiError> {
    let passage = state
        .get_passage_by_id_handler
        .handle(GetPassageById { id })
        .await?;
    Ok(Json(ApiResponse::success(PassageDto::from(&passage))))
}
