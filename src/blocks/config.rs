//! Typed view over the free-form `config` map stored on each block.
//!
//! The stored map is never trusted: keys may be missing, carry values of the
//! wrong JSON type, or hold option names from an older editor. Resolution
//! happens once, here, and every option falls back to its documented default
//! instead of failing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::BlockType;

// ============================================================================
// Option domains
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundColor {
    #[default]
    White,
    Cream,
    Gray,
    Green,
    Transparent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Width {
    #[default]
    Container,
    Full,
}

/// Shared by `padding` and `margin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Spacing {
    None,
    Small,
    #[default]
    Normal,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImagePosition {
    #[default]
    None,
    Background,
    Top,
    Left,
    Right,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentMaxWidth {
    #[default]
    Full,
    Wide,
    Medium,
    Narrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BorderRadius {
    None,
    Small,
    #[default]
    Medium,
    Large,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shadow {
    #[default]
    None,
    Sm,
    Md,
    Lg,
    Xl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Columns {
    #[default]
    Single,
    Two,
    Three,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Animation {
    #[default]
    None,
    FadeIn,
    SlideUp,
    SlideDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TitleSize {
    Small,
    #[default]
    Normal,
    Large,
    Xlarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonStyle {
    #[default]
    Primary,
    Secondary,
}

pub const DEFAULT_OVERLAY_OPACITY: u8 = 40;

// ============================================================================
// Resolved configs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonConfig {
    pub text: Option<String>,
    pub link: Option<String>,
    pub style: ButtonStyle,
}

/// Every presentation option of a custom block, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomBlockConfig {
    pub background_color: BackgroundColor,
    pub text_align: TextAlign,
    pub width: Width,
    pub padding: Spacing,
    pub margin: Spacing,
    pub image_position: ImagePosition,
    pub content_max_width: ContentMaxWidth,
    pub border_radius: BorderRadius,
    pub shadow: Shadow,
    /// Percent black composited over a background image, 0 to 100.
    pub overlay_opacity: u8,
    pub columns: Columns,
    pub animation: Animation,
    pub title_size: TitleSize,
    pub button1: ButtonConfig,
    pub button2: ButtonConfig,
    pub video_url: Option<String>,
    pub title_icon: Option<String>,
    pub image_alt: Option<String>,
}

impl Default for CustomBlockConfig {
    fn default() -> Self {
        Self {
            background_color: BackgroundColor::default(),
            text_align: TextAlign::default(),
            width: Width::default(),
            padding: Spacing::default(),
            margin: Spacing::default(),
            image_position: ImagePosition::default(),
            content_max_width: ContentMaxWidth::default(),
            border_radius: BorderRadius::default(),
            shadow: Shadow::default(),
            overlay_opacity: DEFAULT_OVERLAY_OPACITY,
            columns: Columns::default(),
            animation: Animation::default(),
            title_size: TitleSize::default(),
            button1: ButtonConfig::default(),
            button2: ButtonConfig::default(),
            video_url: None,
            title_icon: None,
            image_alt: None,
        }
    }
}

impl CustomBlockConfig {
    /// Resolve a stored config map. Non-object values resolve to all defaults.
    pub fn from_value(raw: &Value) -> Self {
        let empty = Map::new();
        let map = raw.as_object().unwrap_or(&empty);

        Self {
            background_color: option(map, "backgroundColor"),
            text_align: option(map, "textAlign"),
            width: option(map, "width"),
            padding: option(map, "padding"),
            margin: option(map, "margin"),
            image_position: option(map, "imagePosition"),
            content_max_width: option(map, "contentMaxWidth"),
            border_radius: option(map, "borderRadius"),
            shadow: option(map, "shadow"),
            overlay_opacity: percent(map, "overlayOpacity").unwrap_or(DEFAULT_OVERLAY_OPACITY),
            columns: option(map, "columns"),
            animation: option(map, "animation"),
            title_size: option(map, "titleSize"),
            button1: button(map, "button1"),
            button2: button(map, "button2"),
            video_url: text(map, "videoUrl"),
            title_icon: text(map, "titleIcon"),
            image_alt: text(map, "imageAlt"),
        }
    }
}

/// Config of the kinds that carry their own display text (hero, about, cta).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitledConfig {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

/// Config resolved against the block's kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BlockConfig {
    Titled(TitledConfig),
    /// Placement-only kinds whose content comes from other collections.
    Marker,
    Custom(CustomBlockConfig),
    Unknown,
}

/// The single resolution step from stored map to typed config.
pub fn resolve_config(block_type: &BlockType, raw: &Value) -> BlockConfig {
    match block_type {
        BlockType::Hero | BlockType::About | BlockType::Cta => {
            let empty = Map::new();
            let map = raw.as_object().unwrap_or(&empty);
            BlockConfig::Titled(TitledConfig {
                title: text(map, "title"),
                subtitle: text(map, "subtitle"),
            })
        }
        BlockType::Features
        | BlockType::HowItWorks
        | BlockType::Services
        | BlockType::Gallery
        | BlockType::Testimonials
        | BlockType::Faq
        | BlockType::Satisfaction
        | BlockType::Tips => BlockConfig::Marker,
        BlockType::Custom => BlockConfig::Custom(CustomBlockConfig::from_value(raw)),
        BlockType::Unknown(_) => BlockConfig::Unknown,
    }
}

/// Shallow-merge `patch` into `base`. A `null` value removes the key.
///
/// Non-object bases are replaced by an empty object first; a non-object patch
/// leaves `base` untouched.
pub fn patch_config(base: &mut Value, patch: &Value) {
    let Some(patch) = patch.as_object() else {
        return;
    };
    if !base.is_object() {
        *base = Value::Object(Map::new());
    }
    if let Some(target) = base.as_object_mut() {
        for (key, value) in patch {
            if value.is_null() {
                target.remove(key);
            } else {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

// ============================================================================
// Lenient readers
// ============================================================================

fn option<T: DeserializeOwned + Default>(map: &Map<String, Value>, key: &str) -> T {
    map.get(key)
        .filter(|v| v.is_string())
        .and_then(|v| T::deserialize(v).ok())
        .unwrap_or_default()
}

fn text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Integer percentage, clamped to 0..=100. Numeric strings are accepted.
fn percent(map: &Map<String, Value>, key: &str) -> Option<u8> {
    let raw = match map.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.round().clamp(0.0, 100.0) as u8)
}

/// Flat `button1Text`/`button1Link`/`button1Style` keys, falling back to a
/// nested `button1: {text, link, style}` object.
fn button(map: &Map<String, Value>, prefix: &str) -> ButtonConfig {
    let nested = map.get(prefix).and_then(Value::as_object);
    let pick_text = |field: &str, flat: &str| {
        text(map, &format!("{prefix}{flat}")).or_else(|| nested.and_then(|n| text(n, field)))
    };

    let style_key = format!("{prefix}Style");
    let style = if map.contains_key(&style_key) {
        option(map, &style_key)
    } else {
        nested.map(|n| option(n, "style")).unwrap_or_default()
    };

    ButtonConfig {
        text: pick_text("text", "Text"),
        link: pick_text("link", "Link"),
        style,
    }
}
