//! Content blocks: the page-section model and its rendering pipeline.
//!
//! Nothing in this module performs I/O. Page handlers load blocks from the
//! store, narrow them with [`filter::get_page_blocks`] and hand the result to
//! [`render::render_blocks`].

pub mod config;
pub mod filter;
pub mod icons;
pub mod plan;
pub mod registry;
pub mod render;
pub mod video;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Discriminator selecting how a block is rendered.
///
/// Stored as a plain string column. Strings that do not name a known kind are
/// kept verbatim in [`BlockType::Unknown`] so they round-trip through the admin
/// API untouched; the renderer skips them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Hero,
    About,
    Features,
    HowItWorks,
    Services,
    Gallery,
    Testimonials,
    Faq,
    Satisfaction,
    Cta,
    Tips,
    Custom,
    Unknown(String),
}

impl BlockType {
    /// Exact, case-sensitive parse of a stored type string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hero" => Some(BlockType::Hero),
            "about" => Some(BlockType::About),
            "features" => Some(BlockType::Features),
            "how-it-works" => Some(BlockType::HowItWorks),
            "services" => Some(BlockType::Services),
            "gallery" => Some(BlockType::Gallery),
            "testimonials" => Some(BlockType::Testimonials),
            "faq" => Some(BlockType::Faq),
            "satisfaction" => Some(BlockType::Satisfaction),
            "cta" => Some(BlockType::Cta),
            "tips" => Some(BlockType::Tips),
            "custom" => Some(BlockType::Custom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Hero => "hero",
            BlockType::About => "about",
            BlockType::Features => "features",
            BlockType::HowItWorks => "how-it-works",
            BlockType::Services => "services",
            BlockType::Gallery => "gallery",
            BlockType::Testimonials => "testimonials",
            BlockType::Faq => "faq",
            BlockType::Satisfaction => "satisfaction",
            BlockType::Cta => "cta",
            BlockType::Tips => "tips",
            BlockType::Custom => "custom",
            BlockType::Unknown(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, BlockType::Unknown(_))
    }
}

impl From<String> for BlockType {
    fn from(s: String) -> Self {
        BlockType::parse(&s).unwrap_or(BlockType::Unknown(s))
    }
}

impl From<&str> for BlockType {
    fn from(s: &str) -> Self {
        BlockType::parse(s).unwrap_or_else(|| BlockType::Unknown(s.to_string()))
    }
}

impl From<BlockType> for String {
    fn from(t: BlockType) -> Self {
        match t {
            BlockType::Unknown(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every known kind, in admin picker order.
pub static KNOWN_BLOCK_TYPES: [BlockType; 12] = [
    BlockType::Hero,
    BlockType::About,
    BlockType::Features,
    BlockType::HowItWorks,
    BlockType::Services,
    BlockType::Gallery,
    BlockType::Testimonials,
    BlockType::Faq,
    BlockType::Satisfaction,
    BlockType::Cta,
    BlockType::Tips,
    BlockType::Custom,
];

/// One persisted, orderable section of a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub page: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub image_id: Option<Uuid>,
    pub order: i32,
    pub visible: bool,
    /// Free-form options; shape depends on `block_type` and is never trusted.
    pub config: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentBlock {
    /// A visible block with an empty config, for fixtures and the "add block" action.
    pub fn new(block_type: BlockType, page: Option<&str>, order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            block_type,
            page: page.map(str::to_string),
            title: None,
            subtitle: None,
            content: None,
            image_id: None,
            order,
            visible: true,
            config: Value::Object(Default::default()),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_round_trips_known_names() {
        for kind in KNOWN_BLOCK_TYPES.iter() {
            assert_eq!(BlockType::from(kind.as_str()), *kind);
        }
    }

    #[test]
    fn test_unknown_block_type_is_preserved() {
        let t = BlockType::from("carousel".to_string());
        assert_eq!(t, BlockType::Unknown("carousel".to_string()));
        assert!(!t.is_known());
        assert_eq!(String::from(t), "carousel");
    }

    #[test]
    fn test_block_type_parse_is_case_sensitive() {
        assert!(BlockType::parse("Hero").is_none());
        assert!(BlockType::parse("how_it_works").is_none());
    }

    #[test]
    fn test_content_block_serializes_type_field() {
        let block = ContentBlock::new(BlockType::HowItWorks, Some("home"), 3);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "how-it-works");
        assert_eq!(json["order"], 3);
        assert_eq!(json["visible"], true);
        assert!(json["imageId"].is_null());
    }
}
