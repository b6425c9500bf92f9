//! Database Models - row structs for sqlx and request payloads for the block store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::blocks::{BlockType, ContentBlock};

/// Row of `content_blocks`.
#[derive(Debug, Clone, FromRow)]
pub struct ContentBlockRow {
    pub id: Uuid,
    pub block_type: String,
    pub page: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub image_id: Option<Uuid>,
    pub sort_order: i32,
    pub visible: bool,
    pub config: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContentBlockRow> for ContentBlock {
    fn from(row: ContentBlockRow) -> Self {
        ContentBlock {
            id: row.id,
            block_type: BlockType::from(row.block_type),
            page: row.page,
            title: row.title,
            subtitle: row.subtitle,
            content: row.content,
            image_id: row.image_id,
            order: row.sort_order,
            visible: row.visible,
            config: row.config,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// New block for insertion. `order: None` appends to the end of the page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub page: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub image_id: Option<Uuid>,
    pub order: Option<i32>,
    pub visible: Option<bool>,
    pub config: Option<Value>,
}

/// Partial update. `config` is merged into the stored map key by key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentBlock {
    #[serde(rename = "type")]
    pub block_type: Option<String>,
    pub page: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub image_id: Option<Uuid>,
    pub order: Option<i32>,
    pub visible: Option<bool>,
    pub config: Option<Value>,
    /// Detach the image; the asset itself is kept.
    #[serde(default)]
    pub clear_image: bool,
}

/// One entry of a bulk reorder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderItem {
    pub id: Uuid,
    pub order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_converts_to_domain_block() {
        let now = Utc::now();
        let row = ContentBlockRow {
            id: Uuid::new_v4(),
            block_type: "how-it-works".to_string(),
            page: Some("home".to_string()),
            title: None,
            subtitle: None,
            content: None,
            image_id: None,
            sort_order: 4,
            visible: false,
            config: json!({}),
            created_at: now,
            updated_at: now,
        };
        let block = ContentBlock::from(row);
        assert_eq!(block.block_type, BlockType::HowItWorks);
        assert_eq!(block.order, 4);
        assert!(!block.visible);
    }

    #[test]
    fn test_new_block_payload_uses_type_key() {
        let payload: NewContentBlock = serde_json::from_value(json!({
            "type": "custom",
            "page": "home",
            "imageId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "config": { "backgroundColor": "green" }
        }))
        .unwrap();
        assert_eq!(payload.block_type, "custom");
        assert!(payload.image_id.is_some());
        assert!(payload.order.is_none());
    }

    #[test]
    fn test_update_payload_all_optional() {
        let payload: UpdateContentBlock = serde_json::from_value(json!({})).unwrap();
        assert!(payload.config.is_none());
        assert!(payload.visible.is_none());
    }
}
