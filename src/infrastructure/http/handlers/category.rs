//! Category HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{CategoryListing, ListCategory};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 分类列表：子分类在前，文章在后
pub async fn list_category(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryListing>>, ApiError> {
    let listing = state
        .list_category_handler
        .handle(ListCategory { slug })
        .await?;
    Ok(Json(ApiResponse::success(listing)))
}
