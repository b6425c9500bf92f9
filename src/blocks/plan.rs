//! Custom block interpreter: stored block + config in, fully decided plan out.
//!
//! A [`RenderPlan`] is derived on every render from the block as it is now.
//! Nothing here is cached, so a config edit is visible on the next request.

use serde::Serialize;

use super::config::{BackgroundColor, ButtonConfig, ButtonStyle, Columns, CustomBlockConfig, ImagePosition};
use super::icons::Icon;
use super::video::parse_video_url;
use super::ContentBlock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GridSlot {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    Above,
    Below,
}

/// Where the image goes, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "family", rename_all = "camelCase")]
pub enum ImageLayout {
    /// Image fills the section behind an `overlay_opacity` percent black overlay.
    #[serde(rename_all = "camelCase")]
    Background { image_url: String, overlay_opacity: u8 },
    /// Two-column grid with the image on `side`.
    #[serde(rename_all = "camelCase")]
    Side { image_url: String, side: Side },
    /// Single column, image above or below the text.
    #[serde(rename_all = "camelCase")]
    Stacked { image_url: String, placement: Placement },
    TextOnly,
}

impl ImageLayout {
    /// Grid column holding the image in the side family.
    pub fn image_slot(&self) -> Option<GridSlot> {
        match self {
            ImageLayout::Side { side: Side::Left, .. } => Some(GridSlot::First),
            ImageLayout::Side { side: Side::Right, .. } => Some(GridSlot::Second),
            _ => None,
        }
    }

    /// Grid column holding the text in the side family.
    pub fn text_slot(&self) -> Option<GridSlot> {
        self.image_slot().map(|slot| match slot {
            GridSlot::First => GridSlot::Second,
            GridSlot::Second => GridSlot::First,
        })
    }

    pub fn is_background(&self) -> bool {
        matches!(self, ImageLayout::Background { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitlePlan {
    pub text: String,
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Body {
    #[serde(rename_all = "camelCase")]
    Video { embed_url: String },
    /// Sanitization happens when the body is written out.
    Rich { html: String, columns: Columns },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonPlan {
    pub text: String,
    pub link: String,
    pub style: ButtonStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    pub options: CustomBlockConfig,
    pub layout: ImageLayout,
    /// Light text palette over a green background or a background image.
    pub dark_background: bool,
    pub title: Option<TitlePlan>,
    pub subtitle: Option<String>,
    pub body: Body,
    pub buttons: Vec<ButtonPlan>,
    pub image_alt: String,
}

/// Build the plan for a custom block.
///
/// `image_url` is the already-resolved URL of the block's image; `None` means
/// the block has no image or it could not be resolved, and any image-bearing
/// position degrades to text only.
pub fn plan_custom_block(block: &ContentBlock, image_url: Option<&str>) -> RenderPlan {
    let options = CustomBlockConfig::from_value(&block.config);

    let layout = choose_layout(&options, image_url);
    let dark_background = options.background_color == BackgroundColor::Green || layout.is_background();

    let title = non_empty(block.title.as_deref()).map(|text| TitlePlan {
        text,
        icon: options.title_icon.as_deref().and_then(Icon::from_name),
    });
    let subtitle = non_empty(block.subtitle.as_deref());

    let video = options.video_url.as_deref().and_then(parse_video_url);
    let body = match (video, non_empty(block.content.as_deref())) {
        (Some(video), _) => Body::Video {
            embed_url: video.embed_url(),
        },
        (None, Some(html)) => Body::Rich {
            html,
            columns: options.columns,
        },
        (None, None) => Body::Empty,
    };

    let buttons = [&options.button1, &options.button2]
        .into_iter()
        .filter_map(button_plan)
        .collect();

    let image_alt = options
        .image_alt
        .clone()
        .or_else(|| title.as_ref().map(|t| t.text.clone()))
        .unwrap_or_default();

    RenderPlan {
        options,
        layout,
        dark_background,
        title,
        subtitle,
        body,
        buttons,
        image_alt,
    }
}

fn choose_layout(options: &CustomBlockConfig, image_url: Option<&str>) -> ImageLayout {
    let Some(url) = image_url.map(str::trim).filter(|u| !u.is_empty()) else {
        return ImageLayout::TextOnly;
    };
    let image_url = url.to_string();

    match options.image_position {
        ImagePosition::None => ImageLayout::TextOnly,
        ImagePosition::Background => ImageLayout::Background {
            image_url,
            overlay_opacity: options.overlay_opacity,
        },
        ImagePosition::Left => ImageLayout::Side {
            image_url,
            side: Side::Left,
        },
        ImagePosition::Right => ImageLayout::Side {
            image_url,
            side: Side::Right,
        },
        ImagePosition::Top => ImageLayout::Stacked {
            image_url,
            placement: Placement::Above,
        },
        ImagePosition::Bottom => ImageLayout::Stacked {
            image_url,
            placement: Placement::Below,
        },
    }
}

/// Both text and link are required.
fn button_plan(button: &ButtonConfig) -> Option<ButtonPlan> {
    match (&button.text, &button.link) {
        (Some(text), Some(link)) => Some(ButtonPlan {
            text: text.clone(),
            link: link.clone(),
            style: button.style,
        }),
        _ => None,
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}
