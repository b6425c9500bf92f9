/**
 * Page Routes
 * Public page rendering and the visible-block feed
 */
use axum::{
    extract::Path,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use std::collections::HashMap;

use crate::blocks::filter::get_page_blocks;
use crate::blocks::render::{render_blocks, render_page_document, DefaultSections};
use crate::blocks::ContentBlock;
use crate::config::SITE_CONFIG;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::routes::require_pool;

// ============================================================================
// Helper Functions
// ============================================================================

/// Page slugs are short ASCII identifiers such as `home` or `hakkimizda`.
pub fn is_valid_page_slug(page: &str) -> bool {
    !page.is_empty()
        && page.len() <= 64
        && page
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Visible blocks of `page` in display order.
async fn visible_page_blocks(page: &str) -> ApiResult<Vec<ContentBlock>> {
    if !is_valid_page_slug(page) {
        return Err(ApiError::NotFound);
    }

    let pool = require_pool()?;
    let blocks = db::blocks::list_page_blocks(pool.as_ref(), page).await?;
    Ok(get_page_blocks(blocks, page))
}

async fn render_page(page: &str) -> ApiResult<String> {
    let blocks = visible_page_blocks(page).await?;
    if blocks.is_empty() {
        return Err(ApiError::NotFound);
    }

    let image_ids: Vec<_> = blocks.iter().filter_map(|b| b.image_id).collect();
    let pool = require_pool()?;
    let media: HashMap<_, _> = db::blocks::media_urls(pool.as_ref(), &image_ids)
        .await?
        .into_iter()
        .map(|(id, url)| (id, SITE_CONFIG.media_url(&url)))
        .collect();

    let sections = render_blocks(&blocks, &DefaultSections, &media);
    tracing::debug!(
        page = %page,
        blocks = blocks.len(),
        rendered = sections.len(),
        "page rendered"
    );

    Ok(render_page_document(&SITE_CONFIG.site_title, page, &sections))
}

fn error_page(err: ApiError) -> Response {
    let status = err.status();
    let message = match status {
        StatusCode::NOT_FOUND => "Sayfa bulunamadı",
        StatusCode::SERVICE_UNAVAILABLE => "Site şu anda kullanılamıyor",
        _ => "Bir hata oluştu",
    };

    if let ApiError::Database(e) = &err {
        tracing::error!(error = %e, "database error while rendering page");
    }

    let html = format!(
        "<!DOCTYPE html>\n<html lang=\"tr\">\n<head><meta charset=\"utf-8\"><title>{message}</title></head>\n<body><main><h1>{message}</h1></main></body>\n</html>\n"
    );
    (status, Html(html)).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/pages/{page}/blocks - Visible blocks of a page, in display order
pub async fn get_page_blocks_json(Path(page): Path<String>) -> ApiResult<Json<Vec<ContentBlock>>> {
    Ok(Json(visible_page_blocks(&page).await?))
}

/// GET / - Home page
pub async fn home_page() -> Response {
    match render_page(&SITE_CONFIG.home_page).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_page(e),
    }
}

/// GET /{page} - Any other page
pub async fn show_page(Path(page): Path<String>) -> Response {
    match render_page(&page).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_page(e),
    }
}
