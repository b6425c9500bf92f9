//! Static catalogue of block kinds for the admin "add block" picker.

use serde::Serialize;
use serde_json::Value;

use super::{BlockType, KNOWN_BLOCK_TYPES};

/// Picker entry for one block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockTypeInfo {
    pub label: &'static str,
    pub description: &'static str,
    /// Name understood by [`crate::blocks::icons::Icon::from_name`].
    pub icon: &'static str,
}

/// Picker entry together with its type key, as served to the admin UI.
#[derive(Debug, Clone, Serialize)]
pub struct BlockTypeEntry {
    #[serde(rename = "type")]
    pub block_type: &'static str,
    #[serde(flatten)]
    pub info: BlockTypeInfo,
}

const fn info(label: &'static str, description: &'static str, icon: &'static str) -> BlockTypeInfo {
    BlockTypeInfo {
        label,
        description,
        icon,
    }
}

/// Lookup by exact type string. Unknown strings yield `None`.
pub fn get_block_type(block_type: &str) -> Option<BlockTypeInfo> {
    BlockType::parse(block_type).and_then(|t| describe(&t))
}

/// Label/description/icon for a parsed kind.
pub fn describe(block_type: &BlockType) -> Option<BlockTypeInfo> {
    let entry = match block_type {
        BlockType::Hero => info("Hero", "Sayfanın en üstündeki büyük karşılama alanı", "sparkles"),
        BlockType::About => info("Hakkımızda", "Firma tanıtım metni ve görseli", "info"),
        BlockType::Features => info("Özellikler", "Öne çıkan özelliklerin listesi", "star"),
        BlockType::HowItWorks => info("Nasıl Çalışır", "Adım adım süreç anlatımı", "list-ordered"),
        BlockType::Services => info("Hizmetler", "Hizmet listesinden otomatik doldurulur", "briefcase"),
        BlockType::Gallery => info("Galeri", "Foto albümlerinden otomatik doldurulur", "image"),
        BlockType::Testimonials => info("Müşteri Yorumları", "Onaylı müşteri yorumları", "message-circle"),
        BlockType::Faq => info("Sıkça Sorulan Sorular", "SSS listesinden otomatik doldurulur", "help-circle"),
        BlockType::Satisfaction => info("Memnuniyet", "Memnuniyet göstergeleri ve istatistikler", "award"),
        BlockType::Cta => info("Harekete Geçirici", "İletişim veya teklif çağrısı", "megaphone"),
        BlockType::Tips => info("İpuçları", "Blog yazılarından kısa ipuçları", "lightbulb"),
        BlockType::Custom => info("Özel Blok", "Tamamen yapılandırılabilir içerik bloğu", "layout"),
        BlockType::Unknown(_) => return None,
    };
    Some(entry)
}

/// Every known kind with its picker entry, in picker order.
pub fn all_block_types() -> Vec<BlockTypeEntry> {
    KNOWN_BLOCK_TYPES
        .iter()
        .filter_map(|t| {
            describe(t).map(|info| BlockTypeEntry {
                block_type: t.as_str(),
                info,
            })
        })
        .collect()
}

/// Advisory shape check run at creation time.
///
/// Hero, about and cta blocks are expected to carry a string `title` in their
/// config. Kinds that pull their content from other collections accept
/// anything. Callers log the outcome; persistence is never gated on it.
pub fn validate_block_config(block_type: &str, config: &Value) -> bool {
    match BlockType::parse(block_type) {
        Some(BlockType::Hero) | Some(BlockType::About) | Some(BlockType::Cta) => config
            .get("title")
            .map(Value::is_string)
            .unwrap_or(false),
        Some(_) => true,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_block_type_known() {
        let hero = get_block_type("hero").unwrap();
        assert_eq!(hero.label, "Hero");
        assert!(!hero.description.is_empty());

        let custom = get_block_type("custom").unwrap();
        assert_eq!(custom.icon, "layout");
    }

    #[test]
    fn test_get_block_type_unknown_returns_none() {
        assert!(get_block_type("slider").is_none());
        assert!(get_block_type("").is_none());
        assert!(get_block_type("HERO").is_none());
    }

    #[test]
    fn test_all_block_types_lists_every_kind_once() {
        let all = all_block_types();
        assert_eq!(all.len(), 12);
        assert_eq!(all[0].block_type, "hero");
        assert_eq!(all[11].block_type, "custom");
        let json = serde_json::to_value(&all[3]).unwrap();
        assert_eq!(json["type"], "how-it-works");
        assert_eq!(json["label"], "Nasıl Çalışır");
    }

    #[test]
    fn test_picker_icons_resolve() {
        use crate::blocks::icons::Icon;
        for entry in all_block_types() {
            assert!(
                Icon::from_name(entry.info.icon).is_some(),
                "icon {} for {} is not in the icon set",
                entry.info.icon,
                entry.block_type
            );
        }
    }

    #[test]
    fn test_validate_titled_kinds_require_string_title() {
        assert!(validate_block_config("hero", &json!({ "title": "Merhaba" })));
        assert!(!validate_block_config("hero", &json!({})));
        assert!(!validate_block_config("cta", &json!({ "title": 5 })));
        assert!(validate_block_config("about", &json!({ "title": "" })));
    }

    #[test]
    fn test_validate_data_sourced_kinds_accept_anything() {
        assert!(validate_block_config("services", &json!({})));
        assert!(validate_block_config("gallery", &json!(null)));
        assert!(validate_block_config("custom", &json!({ "anything": [1, 2] })));
    }

    #[test]
    fn test_validate_unknown_kind_fails() {
        assert!(!validate_block_config("slider", &json!({ "title": "x" })));
    }
}
