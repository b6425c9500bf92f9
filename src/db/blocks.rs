//! Content block store: typed queries over `content_blocks` and `media_assets`.
//!
//! Every write is a single-row statement. Reorders issue one independent
//! update per item with no surrounding transaction, and concurrent edits to
//! the same block resolve last-write-wins.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use super::models::{ContentBlockRow, NewContentBlock, ReorderItem, UpdateContentBlock};
use crate::blocks::config::patch_config;
use crate::blocks::ContentBlock;

const BLOCK_COLUMNS: &str = "id, block_type, page, title, subtitle, content, image_id, sort_order, visible, config, created_at, updated_at";

/// Blocks ordered by `sort_order`, then insertion order. Both filters are optional.
pub async fn list_blocks(
    pool: &PgPool,
    page: Option<&str>,
    block_type: Option<&str>,
) -> Result<Vec<ContentBlock>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ContentBlockRow>(&format!(
        r#"
        SELECT {BLOCK_COLUMNS}
        FROM content_blocks
        WHERE ($1::TEXT IS NULL OR page = $1)
          AND ($2::TEXT IS NULL OR block_type = $2)
        ORDER BY sort_order ASC, seq ASC
        "#
    ))
    .bind(page)
    .bind(block_type)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ContentBlock::from).collect())
}

/// Blocks of one page, hidden ones included; callers narrow with
/// [`crate::blocks::filter::get_page_blocks`].
pub async fn list_page_blocks(pool: &PgPool, page: &str) -> Result<Vec<ContentBlock>, sqlx::Error> {
    list_blocks(pool, Some(page), None).await
}

pub async fn get_block(pool: &PgPool, id: Uuid) -> Result<Option<ContentBlock>, sqlx::Error> {
    let row = sqlx::query_as::<_, ContentBlockRow>(&format!(
        "SELECT {BLOCK_COLUMNS} FROM content_blocks WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(ContentBlock::from))
}

/// Insert a block. Without an explicit order it goes after the page's last block.
pub async fn insert_block(pool: &PgPool, new: &NewContentBlock) -> Result<ContentBlock, sqlx::Error> {
    let config = new
        .config
        .clone()
        .filter(|c| c.is_object())
        .unwrap_or_else(|| serde_json::json!({}));

    let row = sqlx::query_as::<_, ContentBlockRow>(&format!(
        r#"
        INSERT INTO content_blocks
            (block_type, page, title, subtitle, content, image_id, sort_order, visible, config, created_at, updated_at)
        VALUES (
            $1, $2, $3, $4, $5, $6,
            COALESCE($7, (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM content_blocks WHERE page IS NOT DISTINCT FROM $2)),
            $8, $9, now(), now()
        )
        RETURNING {BLOCK_COLUMNS}
        "#
    ))
    .bind(&new.block_type)
    .bind(&new.page)
    .bind(&new.title)
    .bind(&new.subtitle)
    .bind(&new.content)
    .bind(new.image_id)
    .bind(new.order)
    .bind(new.visible.unwrap_or(true))
    .bind(&config)
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// Apply `changes` on top of `existing` without touching the database.
///
/// Empty strings clear optional text fields. `config` is shallow-merged.
pub fn apply_changes(mut existing: ContentBlock, changes: &UpdateContentBlock) -> ContentBlock {
    if let Some(block_type) = &changes.block_type {
        existing.block_type = block_type.as_str().into();
    }
    if let Some(page) = &changes.page {
        existing.page = blank_to_none(page);
    }
    if let Some(title) = &changes.title {
        existing.title = blank_to_none(title);
    }
    if let Some(subtitle) = &changes.subtitle {
        existing.subtitle = blank_to_none(subtitle);
    }
    if let Some(content) = &changes.content {
        existing.content = blank_to_none(content);
    }
    if changes.clear_image {
        existing.image_id = None;
    } else if let Some(image_id) = changes.image_id {
        existing.image_id = Some(image_id);
    }
    if let Some(order) = changes.order {
        existing.order = order;
    }
    if let Some(visible) = changes.visible {
        existing.visible = visible;
    }
    if let Some(patch) = &changes.config {
        patch_config(&mut existing.config, patch);
    }
    existing
}

/// Persist every mutable field of `block`.
pub async fn save_block(pool: &PgPool, block: &ContentBlock) -> Result<Option<ContentBlock>, sqlx::Error> {
    let row = sqlx::query_as::<_, ContentBlockRow>(&format!(
        r#"
        UPDATE content_blocks
        SET block_type = $2, page = $3, title = $4, subtitle = $5, content = $6,
            image_id = $7, sort_order = $8, visible = $9, config = $10, updated_at = now()
        WHERE id = $1
        RETURNING {BLOCK_COLUMNS}
        "#
    ))
    .bind(block.id)
    .bind(block.block_type.as_str())
    .bind(&block.page)
    .bind(&block.title)
    .bind(&block.subtitle)
    .bind(&block.content)
    .bind(block.image_id)
    .bind(block.order)
    .bind(block.visible)
    .bind(&block.config)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(ContentBlock::from))
}

/// Hard delete. Returns whether a row was removed; referenced media stays.
pub async fn delete_block(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM content_blocks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Set visibility, or flip it when `visible` is `None`.
pub async fn set_visibility(
    pool: &PgPool,
    id: Uuid,
    visible: Option<bool>,
) -> Result<Option<ContentBlock>, sqlx::Error> {
    let row = sqlx::query_as::<_, ContentBlockRow>(&format!(
        r#"
        UPDATE content_blocks
        SET visible = COALESCE($2, NOT visible), updated_at = now()
        WHERE id = $1
        RETURNING {BLOCK_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(visible)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(ContentBlock::from))
}

/// Bulk order rewrite. Returns how many of the ids still existed.
pub async fn reorder_blocks(pool: &PgPool, items: &[ReorderItem]) -> Result<u64, sqlx::Error> {
    let mut updated = 0;
    for item in items {
        let result = sqlx::query(
            "UPDATE content_blocks SET sort_order = $2, updated_at = now() WHERE id = $1",
        )
        .bind(item.id)
        .bind(item.order)
        .execute(pool)
        .await?;
        updated += result.rows_affected();
    }
    Ok(updated)
}

/// Stored URLs of the given media assets. Unknown ids are simply absent.
pub async fn media_urls(pool: &PgPool, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(Uuid, String)> =
        sqlx::query_as("SELECT id, url FROM media_assets WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().collect())
}

fn blank_to_none(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
