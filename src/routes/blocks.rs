/**
 * Content Block Routes
 * Admin CRUD, reordering and visibility for page blocks
 */
use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blocks::plan::{plan_custom_block, RenderPlan};
use crate::blocks::registry::{all_block_types, validate_block_config, BlockTypeEntry};
use crate::blocks::{BlockType, ContentBlock};
use crate::config::SITE_CONFIG;
use crate::db::{
    self,
    models::{NewContentBlock, ReorderItem, UpdateContentBlock},
};
use crate::error::{ApiError, ApiResult};
use crate::routes::auth::require_admin;
use crate::routes::pages::is_valid_page_slug;
use crate::routes::{require_pool, SuccessResponse};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for GET /api/blocks
#[derive(Debug, Default, Deserialize)]
pub struct BlockListQuery {
    pub page: Option<String>,
    #[serde(rename = "type")]
    pub block_type: Option<String>,
}

/// Response for GET /api/blocks
#[derive(Debug, Serialize)]
pub struct BlockListResponse {
    pub items: Vec<ContentBlock>,
    pub total: usize,
}

/// Request body for PATCH /api/blocks/{id}/visibility
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VisibilityRequest {
    /// Explicit value; omitted means toggle.
    #[serde(default)]
    pub visible: Option<bool>,
}

/// Request body for PUT /api/blocks/reorder
#[derive(Debug, Deserialize, Serialize)]
pub struct ReorderRequest {
    pub items: Vec<ReorderItem>,
}

/// Response for PUT /api/blocks/reorder
#[derive(Debug, Serialize, Deserialize)]
pub struct ReorderResponse {
    pub success: bool,
    pub updated: u64,
}

// ============================================================================
// Validation
// ============================================================================

fn known_block_type(raw: &str) -> ApiResult<BlockType> {
    BlockType::parse(raw).ok_or_else(|| ApiError::BadRequest {
        error: "Unknown block type".to_string(),
        message: Some(format!("'{}' is not a registered block type", raw)),
    })
}

/// Sanitize HTML content using ammonia
fn sanitize_html(html: &str) -> String {
    ammonia::clean(html)
}

fn normalize_page(page: Option<String>) -> Option<String> {
    page.map(|p| p.trim().to_string()).filter(|p| !p.is_empty())
}

/// Pages must be servable at `/{page}`.
fn check_page_slug(page: Option<&str>) -> ApiResult<()> {
    match page {
        Some(p) if !is_valid_page_slug(p) => Err(ApiError::BadRequest {
            error: "Invalid page".to_string(),
            message: Some(format!(
                "'{}' must be 1-64 ASCII letters, digits, '-' or '_'",
                p
            )),
        }),
        _ => Ok(()),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/block-types - Catalogue for the "add block" picker
pub async fn list_block_types() -> Json<Vec<BlockTypeEntry>> {
    Json(all_block_types())
}

/// GET /api/blocks?page=&type= - All blocks, hidden ones included (auth required)
pub async fn list_blocks(
    headers: HeaderMap,
    Query(query): Query<BlockListQuery>,
) -> ApiResult<impl IntoResponse> {
    require_admin(&headers)?;
    let pool = require_pool()?;

    let page = normalize_page(query.page);
    let items = db::blocks::list_blocks(
        pool.as_ref(),
        page.as_deref(),
        query.block_type.as_deref(),
    )
    .await?;

    Ok(Json(BlockListResponse {
        total: items.len(),
        items,
    }))
}

/// POST /api/blocks - Create a block (auth required)
pub async fn create_block(
    headers: HeaderMap,
    Json(mut payload): Json<NewContentBlock>,
) -> ApiResult<impl IntoResponse> {
    require_admin(&headers)?;

    let block_type = known_block_type(&payload.block_type)?;
    payload.page = normalize_page(payload.page);
    check_page_slug(payload.page.as_deref())?;

    let config = payload.config.clone().unwrap_or_else(|| serde_json::json!({}));
    if !validate_block_config(block_type.as_str(), &config) {
        tracing::warn!(
            block_type = %block_type,
            "block config does not match the expected shape; saving anyway"
        );
    }

    let pool = require_pool()?;

    payload.content = payload.content.map(|h| sanitize_html(&h));

    let block = db::blocks::insert_block(pool.as_ref(), &payload).await?;
    tracing::info!(block_id = %block.id, block_type = %block.block_type, page = ?block.page, "block created");

    Ok((StatusCode::CREATED, Json(block)))
}

/// GET /api/blocks/{id} - Single block (auth required)
pub async fn get_block(headers: HeaderMap, Path(id): Path<Uuid>) -> ApiResult<impl IntoResponse> {
    require_admin(&headers)?;
    let pool = require_pool()?;

    let block = db::blocks::get_block(pool.as_ref(), id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(block))
}

/// PATCH /api/blocks/{id} - Partial update; `config` keys are merged (auth required)
pub async fn update_block(
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(mut changes): Json<UpdateContentBlock>,
) -> ApiResult<impl IntoResponse> {
    require_admin(&headers)?;

    if let Some(raw) = &changes.block_type {
        known_block_type(raw)?;
    }
    // An empty string detaches the block from its page
    changes.page = changes.page.map(|p| p.trim().to_string());
    check_page_slug(changes.page.as_deref().filter(|p| !p.is_empty()))?;

    let pool = require_pool()?;

    let existing = db::blocks::get_block(pool.as_ref(), id)
        .await?
        .ok_or(ApiError::NotFound)?;

    changes.content = changes.content.map(|h| sanitize_html(&h));
    let updated = db::blocks::apply_changes(existing, &changes);

    let saved = db::blocks::save_block(pool.as_ref(), &updated)
        .await?
        .ok_or(ApiError::NotFound)?;

    tracing::info!(block_id = %saved.id, "block updated");
    Ok(Json(saved))
}

/// DELETE /api/blocks/{id} - Hard delete (auth required)
pub async fn delete_block(headers: HeaderMap, Path(id): Path<Uuid>) -> ApiResult<impl IntoResponse> {
    require_admin(&headers)?;
    let pool = require_pool()?;

    if !db::blocks::delete_block(pool.as_ref(), id).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(block_id = %id, "block deleted");
    Ok(Json(SuccessResponse { success: true }))
}

/// PATCH /api/blocks/{id}/visibility - Set or toggle visibility (auth required)
pub async fn set_visibility(
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<VisibilityRequest>,
) -> ApiResult<impl IntoResponse> {
    require_admin(&headers)?;
    let pool = require_pool()?;

    let block = db::blocks::set_visibility(pool.as_ref(), id, payload.visible)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(block))
}

/// PUT /api/blocks/reorder - Bulk order rewrite (auth required)
pub async fn reorder_blocks(
    headers: HeaderMap,
    Json(payload): Json<ReorderRequest>,
) -> ApiResult<impl IntoResponse> {
    require_admin(&headers)?;

    if payload.items.is_empty() {
        return Err(ApiError::bad_request("No items to reorder"));
    }

    let pool = require_pool()?;
    let updated = db::blocks::reorder_blocks(pool.as_ref(), &payload.items).await?;

    tracing::info!(requested = payload.items.len(), updated, "blocks reordered");
    Ok(Json(ReorderResponse {
        success: true,
        updated,
    }))
}

/// GET /api/blocks/{id}/plan - Resolved rendering plan of a custom block (auth required)
pub async fn get_block_plan(headers: HeaderMap, Path(id): Path<Uuid>) -> ApiResult<Json<RenderPlan>> {
    require_admin(&headers)?;
    let pool = require_pool()?;

    let block = db::blocks::get_block(pool.as_ref(), id)
        .await?
        .ok_or(ApiError::NotFound)?;

    if block.block_type != BlockType::Custom {
        return Err(ApiError::BadRequest {
            error: "Not a custom block".to_string(),
            message: Some(format!("'{}' blocks have no configurable plan", block.block_type)),
        });
    }

    let image_url = match block.image_id {
        Some(image_id) => db::blocks::media_urls(pool.as_ref(), &[image_id])
            .await?
            .remove(&image_id)
            .map(|url| SITE_CONFIG.media_url(&url)),
        None => None,
    };

    Ok(Json(plan_custom_block(&block, image_url.as_deref())))
}
