//! HTML rendering and per-block dispatch.
//!
//! Custom blocks go through [`plan_custom_block`] and are written out here.
//! The eleven fixed kinds are handed to a [`SectionRenderer`]; unknown kinds
//! produce nothing. Each block renders in isolation, so an error or panic in
//! one section drops that section only.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::panic::{self, AssertUnwindSafe};

use url::Url;
use uuid::Uuid;

use super::config::{
    Animation, BackgroundColor, BlockConfig, BorderRadius, ButtonStyle, Columns, ContentMaxWidth,
    Shadow, Spacing, TextAlign, TitleSize, Width,
};
use super::plan::{plan_custom_block, Body, ImageLayout, Placement, RenderPlan, Side};
use super::{config::resolve_config, BlockType, ContentBlock};

// ============================================================================
// Seams
// ============================================================================

/// Resolves a media asset id to a public URL.
pub trait MediaResolver {
    fn resolve(&self, image_id: Uuid) -> Option<String>;
}

impl MediaResolver for HashMap<Uuid, String> {
    fn resolve(&self, image_id: Uuid) -> Option<String> {
        self.get(&image_id).cloned()
    }
}

/// Resolver for contexts without media (previews, tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMedia;

impl MediaResolver for NoMedia {
    fn resolve(&self, _image_id: Uuid) -> Option<String> {
        None
    }
}

/// Renders the fixed, component-backed block kinds.
pub trait SectionRenderer {
    fn render_section(&self, block: &ContentBlock) -> Result<String, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("section `{kind}` could not be rendered: {reason}")]
    Section { kind: String, reason: String },

    #[error("renderer panicked")]
    Panicked,
}

/// One rendered section, tagged with the block it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub block_id: Uuid,
    pub html: String,
}

// ============================================================================
// Dispatch
// ============================================================================

/// Render one block. `Ok(None)` means the kind is not renderable.
pub fn render_block<S, M>(
    block: &ContentBlock,
    sections: &S,
    media: &M,
) -> Result<Option<String>, RenderError>
where
    S: SectionRenderer + ?Sized,
    M: MediaResolver + ?Sized,
{
    match &block.block_type {
        BlockType::Unknown(kind) => {
            tracing::debug!(block_id = %block.id, kind = %kind, "skipping block of unknown type");
            Ok(None)
        }
        BlockType::Custom => Ok(Some(render_custom_block(block, media))),
        _ => sections.render_section(block).map(Some),
    }
}

/// Render blocks in order, dropping any block whose renderer fails.
pub fn render_blocks<S, M>(blocks: &[ContentBlock], sections: &S, media: &M) -> Vec<RenderedSection>
where
    S: SectionRenderer + ?Sized,
    M: MediaResolver + ?Sized,
{
    let mut rendered = Vec::with_capacity(blocks.len());

    for block in blocks {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| render_block(block, sections, media)))
            .unwrap_or(Err(RenderError::Panicked));

        match outcome {
            Ok(Some(html)) => rendered.push(RenderedSection {
                block_id: block.id,
                html,
            }),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    block_id = %block.id,
                    block_type = %block.block_type,
                    error = %e,
                    "block render failed, skipping"
                );
            }
        }
    }

    rendered
}

/// Full HTML document for a page.
pub fn render_page_document(site_title: &str, page: &str, sections: &[RenderedSection]) -> String {
    let mut body = String::new();
    for section in sections {
        body.push_str(&section.html);
        body.push('\n');
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="tr">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="/static/site.css">
</head>
<body data-page="{page}">
<main>
{body}</main>
</body>
</html>
"#,
        title = escape_html(site_title),
        page = escape_html(page),
        body = body,
    )
}

// ============================================================================
// Fixed sections
// ============================================================================

/// Anchor markup for the fixed kinds.
///
/// Hero, about and cta blocks print the text they carry. Data-sourced kinds
/// print a `data-source` placeholder that the page fills from its own
/// collection (services, gallery albums, testimonials and so on).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSections;

impl SectionRenderer for DefaultSections {
    fn render_section(&self, block: &ContentBlock) -> Result<String, RenderError> {
        let kind = block.block_type.as_str();
        let mut html = String::new();

        let _ = write!(
            html,
            r#"<section id="{kind}-{id}" data-block-type="{kind}" class="block-section block-{kind}">"#,
            kind = kind,
            id = block.id,
        );

        let (title, subtitle) = match resolve_config(&block.block_type, &block.config) {
            BlockConfig::Titled(cfg) => (
                non_empty(block.title.as_deref()).or(cfg.title),
                non_empty(block.subtitle.as_deref()).or(cfg.subtitle),
            ),
            BlockConfig::Marker => (
                non_empty(block.title.as_deref()),
                non_empty(block.subtitle.as_deref()),
            ),
            BlockConfig::Custom(_) | BlockConfig::Unknown => {
                return Err(RenderError::Section {
                    kind: kind.to_string(),
                    reason: "not a fixed section kind".to_string(),
                })
            }
        };

        if let Some(title) = title {
            let _ = write!(html, r#"<h2 class="section-title">{}</h2>"#, escape_html(&title));
        }
        if let Some(subtitle) = subtitle {
            let _ = write!(html, r#"<p class="section-subtitle">{}</p>"#, escape_html(&subtitle));
        }
        if let Some(content) = non_empty(block.content.as_deref()) {
            let _ = write!(html, r#"<div class="section-content">{}</div>"#, ammonia::clean(&content));
        }
        if !matches!(
            block.block_type,
            BlockType::Hero | BlockType::About | BlockType::Cta
        ) {
            let _ = write!(html, r#"<div data-source="{}"></div>"#, kind);
        }

        html.push_str("</section>");
        Ok(html)
    }
}

// ============================================================================
// Custom blocks
// ============================================================================

pub fn render_custom_block<M: MediaResolver + ?Sized>(block: &ContentBlock, media: &M) -> String {
    let image_url = block.image_id.and_then(|id| media.resolve(id));
    let plan = plan_custom_block(block, image_url.as_deref());
    render_plan(block.id, &plan)
}

/// Write out a resolved plan as one `<section>`.
pub fn render_plan(block_id: Uuid, plan: &RenderPlan) -> String {
    let o = &plan.options;
    let mut html = String::new();

    let section_classes = join_classes(&[
        "relative",
        "overflow-hidden",
        background_class(o.background_color),
        padding_class(o.padding),
        margin_class(o.margin),
        animation_class(o.animation),
    ]);
    let _ = write!(
        html,
        r#"<section id="block-{block_id}" data-block-type="custom" class="{section_classes}">"#
    );

    if let ImageLayout::Background {
        image_url,
        overlay_opacity,
    } = &plan.layout
    {
        let _ = write!(
            html,
            r#"<div class="absolute inset-0 bg-cover bg-center" style="background-image: url('{}')" role="img" aria-label="{}"></div>"#,
            escape_css_url(image_url),
            escape_html(&plan.image_alt),
        );
        let _ = write!(
            html,
            r#"<div class="absolute inset-0 bg-black" style="opacity: {:.2}"></div>"#,
            f32::from(*overlay_opacity) / 100.0
        );
    }

    let _ = write!(html, r#"<div class="relative {}">"#, width_class(o.width));
    let _ = write!(
        html,
        r#"<div class="{} mx-auto">"#,
        max_width_class(o.content_max_width)
    );

    match &plan.layout {
        ImageLayout::Side { image_url, side } => {
            html.push_str(r#"<div class="grid md:grid-cols-2 gap-8 md:gap-12 items-center">"#);
            match side {
                Side::Left => {
                    html.push_str(r#"<div data-slot="first">"#);
                    html.push_str(&image_html(image_url, plan));
                    html.push_str("</div>");
                    html.push_str(r#"<div data-slot="second">"#);
                    html.push_str(&text_html(plan));
                    html.push_str("</div>");
                }
                Side::Right => {
                    // Text first in source; the image is pinned to column two.
                    html.push_str(r#"<div data-slot="first" class="md:col-start-1 md:row-start-1">"#);
                    html.push_str(&text_html(plan));
                    html.push_str("</div>");
                    html.push_str(r#"<div data-slot="second" class="md:col-start-2 md:row-start-1">"#);
                    html.push_str(&image_html(image_url, plan));
                    html.push_str("</div>");
                }
            }
            html.push_str("</div>");
        }
        ImageLayout::Stacked {
            image_url,
            placement,
        } => {
            let image = format!(r#"<div class="{}">{}</div>"#, stacked_image_spacing(*placement), image_html(image_url, plan));
            match placement {
                Placement::Above => {
                    html.push_str(&image);
                    html.push_str(&text_html(plan));
                }
                Placement::Below => {
                    html.push_str(&text_html(plan));
                    html.push_str(&image);
                }
            }
        }
        ImageLayout::Background { .. } | ImageLayout::TextOnly => {
            html.push_str(&text_html(plan));
        }
    }

    html.push_str("</div></div></section>");
    html
}

fn text_html(plan: &RenderPlan) -> String {
    let o = &plan.options;
    let mut html = String::new();
    let _ = write!(html, r#"<div class="{}">"#, text_align_class(o.text_align));

    if let Some(title) = &plan.title {
        let heading_classes = join_classes(&[
            title_size_class(o.title_size),
            "font-bold",
            title_color_class(plan.dark_background),
        ]);
        let _ = write!(html, r#"<h2 class="{heading_classes}">"#);
        if let Some(icon) = title.icon {
            let _ = write!(
                html,
                r#"<span class="inline-flex items-center gap-3 {}">{}"#,
                justify_class(o.text_align),
                icon.to_svg("w-8 h-8 shrink-0")
            );
            let _ = write!(html, "<span>{}</span></span>", escape_html(&title.text));
        } else {
            html.push_str(&escape_html(&title.text));
        }
        html.push_str("</h2>");
    }

    if let Some(subtitle) = &plan.subtitle {
        let _ = write!(
            html,
            r#"<p class="mt-4 text-lg {}">{}</p>"#,
            subtitle_color_class(plan.dark_background),
            escape_html(subtitle)
        );
    }

    match &plan.body {
        Body::Video { embed_url } => {
            let _ = write!(
                html,
                r#"<div class="mt-8 aspect-video overflow-hidden {} {}"><iframe src="{}" title="{}" class="w-full h-full" loading="lazy" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe></div>"#,
                radius_class(o.border_radius),
                shadow_class(o.shadow),
                escape_html(embed_url),
                escape_html(plan.title.as_ref().map(|t| t.text.as_str()).unwrap_or("Video")),
            );
        }
        Body::Rich { html: content, columns } => {
            let classes = join_classes(&[
                "mt-6",
                "prose",
                "max-w-none",
                if plan.dark_background { "prose-invert" } else { "" },
                columns_class(*columns),
            ]);
            let _ = write!(html, r#"<div class="{}">{}</div>"#, classes, ammonia::clean(content));
        }
        Body::Empty => {}
    }

    if !plan.buttons.is_empty() {
        let _ = write!(
            html,
            r#"<div class="mt-8 flex flex-wrap gap-4 {}">"#,
            justify_class(o.text_align)
        );
        for button in &plan.buttons {
            let _ = write!(
                html,
                r#"<a href="{}" class="{}">{}</a>"#,
                escape_html(&safe_href(&button.link)),
                button_class(button.style, plan.dark_background),
                escape_html(&button.text)
            );
        }
        html.push_str("</div>");
    }

    html.push_str("</div>");
    html
}

fn image_html(url: &str, plan: &RenderPlan) -> String {
    format!(
        r#"<img src="{}" alt="{}" class="w-full h-auto object-cover {} {}" loading="lazy">"#,
        escape_html(url),
        escape_html(&plan.image_alt),
        radius_class(plan.options.border_radius),
        shadow_class(plan.options.shadow),
    )
}

fn stacked_image_spacing(placement: Placement) -> &'static str {
    match placement {
        Placement::Above => "mb-8",
        Placement::Below => "mt-8",
    }
}

// ============================================================================
// Class maps
// ============================================================================

fn background_class(color: BackgroundColor) -> &'static str {
    match color {
        BackgroundColor::White => "bg-white",
        BackgroundColor::Cream => "bg-cream",
        BackgroundColor::Gray => "bg-gray-50",
        BackgroundColor::Green => "bg-green-800",
        BackgroundColor::Transparent => "bg-transparent",
    }
}

fn text_align_class(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "text-left",
        TextAlign::Center => "text-center",
        TextAlign::Right => "text-right",
    }
}

fn justify_class(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "justify-start",
        TextAlign::Center => "justify-center",
        TextAlign::Right => "justify-end",
    }
}

fn width_class(width: Width) -> &'static str {
    match width {
        Width::Container => "container mx-auto px-4",
        Width::Full => "w-full px-4",
    }
}

fn padding_class(spacing: Spacing) -> &'static str {
    match spacing {
        Spacing::None => "py-0",
        Spacing::Small => "py-8",
        Spacing::Normal => "py-16",
        Spacing::Large => "py-24",
    }
}

fn margin_class(spacing: Spacing) -> &'static str {
    match spacing {
        Spacing::None => "my-0",
        Spacing::Small => "my-4",
        Spacing::Normal => "my-8",
        Spacing::Large => "my-16",
    }
}

fn max_width_class(width: ContentMaxWidth) -> &'static str {
    match width {
        ContentMaxWidth::Full => "max-w-none",
        ContentMaxWidth::Wide => "max-w-6xl",
        ContentMaxWidth::Medium => "max-w-4xl",
        ContentMaxWidth::Narrow => "max-w-2xl",
    }
}

fn radius_class(radius: BorderRadius) -> &'static str {
    match radius {
        BorderRadius::None => "rounded-none",
        BorderRadius::Small => "rounded",
        BorderRadius::Medium => "rounded-lg",
        BorderRadius::Large => "rounded-2xl",
        BorderRadius::Full => "rounded-full",
    }
}

fn shadow_class(shadow: Shadow) -> &'static str {
    match shadow {
        Shadow::None => "shadow-none",
        Shadow::Sm => "shadow-sm",
        Shadow::Md => "shadow-md",
        Shadow::Lg => "shadow-lg",
        Shadow::Xl => "shadow-xl",
    }
}

fn columns_class(columns: Columns) -> &'static str {
    match columns {
        Columns::Single => "",
        Columns::Two => "md:columns-2 gap-8",
        Columns::Three => "md:columns-3 gap-8",
    }
}

fn animation_class(animation: Animation) -> &'static str {
    match animation {
        Animation::None => "",
        Animation::FadeIn => "animate-fade-in",
        Animation::SlideUp => "animate-slide-up",
        Animation::SlideDown => "animate-slide-down",
    }
}

fn title_size_class(size: TitleSize) -> &'static str {
    match size {
        TitleSize::Small => "text-2xl",
        TitleSize::Normal => "text-3xl md:text-4xl",
        TitleSize::Large => "text-4xl md:text-5xl",
        TitleSize::Xlarge => "text-5xl md:text-6xl",
    }
}

fn title_color_class(dark: bool) -> &'static str {
    if dark {
        "text-white"
    } else {
        "text-gray-900"
    }
}

fn subtitle_color_class(dark: bool) -> &'static str {
    if dark {
        "text-white/80"
    } else {
        "text-gray-600"
    }
}

fn button_class(style: ButtonStyle, dark: bool) -> &'static str {
    match (style, dark) {
        (ButtonStyle::Primary, _) => "btn btn-primary",
        (ButtonStyle::Secondary, false) => "btn btn-secondary",
        (ButtonStyle::Secondary, true) => "btn btn-secondary btn-on-dark",
    }
}

// ============================================================================
// Escaping helpers
// ============================================================================

fn join_classes(classes: &[&str]) -> String {
    classes
        .iter()
        .filter(|c| !c.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Characters that could end the quoted `url('..')` are percent-encoded;
/// HTML entities would be decoded before CSS parsing.
fn escape_css_url(s: &str) -> String {
    let encoded = s
        .replace('\\', "%5C")
        .replace('(', "%28")
        .replace(')', "%29")
        .replace('\'', "%27")
        .replace('"', "%22")
        .replace(['\n', '\r', '\t'], "");
    escape_html(&encoded)
}

const LINK_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// Relative links and http(s), mailto and tel URLs pass; anything else becomes `#`.
///
/// Tabs and newlines are dropped first, as browsers ignore them inside URLs.
fn safe_href(link: &str) -> String {
    let cleaned: String = link
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();
    let cleaned = cleaned.trim_matches(|c: char| c.is_ascii_control() || c == ' ');

    match Url::parse(cleaned) {
        Ok(url) if LINK_SCHEMES.contains(&url.scheme()) => cleaned.to_string(),
        Ok(_) => "#".to_string(),
        Err(url::ParseError::RelativeUrlWithoutBase) => cleaned.to_string(),
        Err(_) => "#".to_string(),
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const IMG: &str = "https://cdn.example.com/media/ekip.jpg";

    fn custom(config: Value) -> ContentBlock {
        let mut block = ContentBlock::new(BlockType::Custom, Some("home"), 0);
        block.config = config;
        block
    }

    fn with_image(mut block: ContentBlock) -> (ContentBlock, HashMap<Uuid, String>) {
        let image_id = Uuid::new_v4();
        block.image_id = Some(image_id);
        let mut media = HashMap::new();
        media.insert(image_id, IMG.to_string());
        (block, media)
    }

    struct FailingSections;

    impl SectionRenderer for FailingSections {
        fn render_section(&self, block: &ContentBlock) -> Result<String, RenderError> {
            match block.block_type {
                BlockType::Faq => Err(RenderError::Section {
                    kind: "faq".to_string(),
                    reason: "faq list unavailable".to_string(),
                }),
                BlockType::Gallery => panic!("gallery component blew up"),
                _ => DefaultSections.render_section(block),
            }
        }
    }

    #[test]
    fn test_empty_config_renders_defaults() {
        let mut block = custom(json!({}));
        block.title = Some("Merhaba".to_string());
        let html = render_custom_block(&block, &NoMedia);

        assert!(html.contains("bg-white"));
        assert!(html.contains("py-16"));
        assert!(html.contains("text-left"));
        assert!(html.contains("container mx-auto"));
        assert!(html.contains(r#"font-bold text-gray-900">Merhaba</h2>"#));
        assert!(!html.contains("<svg"));
        assert!(!html.contains("<a "));
        assert!(!html.contains("<iframe"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("grid"));
    }

    #[test]
    fn test_background_image_with_overlay() {
        let mut block = custom(json!({
            "backgroundColor": "green",
            "imagePosition": "background",
            "overlayOpacity": 60,
        }));
        block.title = Some("Bahçe Bakımı".to_string());
        block.subtitle = Some("Her mevsim".to_string());
        let (block, media) = with_image(block);
        let html = render_custom_block(&block, &media);

        assert!(html.contains(&format!("background-image: url('{IMG}')")));
        assert!(html.contains(r#"class="absolute inset-0 bg-black" style="opacity: 0.60""#));
        assert!(html.contains("text-white"));
        assert!(html.contains("text-white/80"));
        assert!(!html.contains("text-gray-900"));
    }

    #[test]
    fn test_side_layout_source_order() {
        let mut block = custom(json!({ "imagePosition": "left" }));
        block.title = Some("Biz Kimiz".to_string());
        let (block, media) = with_image(block);
        let html = render_custom_block(&block, &media);
        let img = html.find("<img").unwrap();
        let title = html.find("Biz Kimiz").unwrap();
        assert!(img < title);
        assert!(html.contains("md:grid-cols-2"));

        let mut block = custom(json!({ "imagePosition": "right" }));
        block.title = Some("Biz Kimiz".to_string());
        let (block, media) = with_image(block);
        let html = render_custom_block(&block, &media);
        let img = html.find("<img").unwrap();
        let title = html.find("Biz Kimiz").unwrap();
        assert!(title < img);
        assert!(html.contains(r#"data-slot="second" class="md:col-start-2 md:row-start-1"><img"#));
    }

    #[test]
    fn test_stacked_layouts_order() {
        let mut block = custom(json!({ "imagePosition": "bottom" }));
        block.title = Some("Alt".to_string());
        let (block, media) = with_image(block);
        let html = render_custom_block(&block, &media);
        assert!(html.find("Alt</h2>").unwrap() < html.find("<img").unwrap());

        let mut block = custom(json!({ "imagePosition": "top" }));
        block.title = Some("Üst".to_string());
        let (block, media) = with_image(block);
        let html = render_custom_block(&block, &media);
        assert!(html.find("<img").unwrap() < html.find("Üst</h2>").unwrap());
    }

    #[test]
    fn test_unresolvable_image_renders_text_only() {
        let mut block = custom(json!({ "imagePosition": "left" }));
        block.image_id = Some(Uuid::new_v4());
        block.title = Some("Metin".to_string());
        let html = render_custom_block(&block, &NoMedia);
        assert!(!html.contains("<img"));
        assert!(!html.contains("grid"));
        assert!(html.contains("Metin"));
    }

    #[test]
    fn test_two_columns_only_wrap_content() {
        let mut block = custom(json!({
            "columns": "two",
            "button1Text": "Detay",
            "button1Link": "/hizmetler",
        }));
        block.title = Some("Başlık".to_string());
        block.content = Some("<p>A</p><p>B</p>".to_string());
        let html = render_custom_block(&block, &NoMedia);

        assert!(html.contains(r#"<div class="mt-6 prose max-w-none md:columns-2 gap-8"><p>A</p><p>B</p></div>"#));
        let columns_at = html.find("md:columns-2").unwrap();
        assert!(html.find("Başlık").unwrap() < columns_at);
        assert!(html.find(r#"href="/hizmetler""#).unwrap() > html.rfind("</p></div>").unwrap());
    }

    #[test]
    fn test_video_replaces_content() {
        let mut block = custom(json!({ "videoUrl": "https://vimeo.com/76979871" }));
        block.content = Some("<p>gizli</p>".to_string());
        let html = render_custom_block(&block, &NoMedia);
        assert!(html.contains(r#"<iframe src="https://player.vimeo.com/video/76979871""#));
        assert!(!html.contains("gizli"));
    }

    #[test]
    fn test_content_is_sanitized() {
        let mut block = custom(json!({}));
        block.content = Some(r#"<p>ok</p><script>alert(1)</script><a href="javascript:x()">x</a>"#.to_string());
        let html = render_custom_block(&block, &NoMedia);
        assert!(html.contains("<p>ok</p>"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_text_fields_are_escaped() {
        let mut block = custom(json!({
            "button1Text": "<b>Tıkla</b>",
            "button1Link": "javascript:alert(1)",
        }));
        block.title = Some("<img src=x onerror=alert(1)>".to_string());
        let html = render_custom_block(&block, &NoMedia);
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains(r##"<a href="#" class="btn btn-primary">&lt;b&gt;Tıkla&lt;/b&gt;</a>"##));
    }

    #[test]
    fn test_title_icon_rendered_before_text() {
        let mut block = custom(json!({ "titleIcon": "leaf", "textAlign": "center" }));
        block.title = Some("Doğal".to_string());
        let html = render_custom_block(&block, &NoMedia);
        assert!(html.contains("icon-leaf"));
        assert!(html.contains("justify-center"));
        assert!(html.find("<svg").unwrap() < html.find("Doğal").unwrap());
    }

    #[test]
    fn test_unknown_option_values_use_default_classes() {
        let mut block = custom(json!({
            "backgroundColor": "neon",
            "padding": "huge",
            "shadow": "xxl",
            "borderRadius": "blob",
            "imagePosition": "diagonal",
        }));
        block.title = Some("X".to_string());
        let (block, media) = with_image(block);
        let html = render_custom_block(&block, &media);
        assert!(html.contains("bg-white"));
        assert!(html.contains("py-16"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_fixed_sections_render_anchor() {
        let mut hero = ContentBlock::new(BlockType::Hero, Some("home"), 0);
        hero.config = json!({ "title": "Profesyonel Temizlik" });
        let html = DefaultSections.render_section(&hero).unwrap();
        assert!(html.contains(r#"data-block-type="hero""#));
        assert!(html.contains("Profesyonel Temizlik"));
        assert!(!html.contains("data-source"));

        let services = ContentBlock::new(BlockType::Services, Some("home"), 1);
        let html = DefaultSections.render_section(&services).unwrap();
        assert!(html.contains(r#"<div data-source="services"></div>"#));
    }

    #[test]
    fn test_block_title_overrides_config_title() {
        let mut cta = ContentBlock::new(BlockType::Cta, Some("home"), 0);
        cta.config = json!({ "title": "Config" });
        cta.title = Some("Blok".to_string());
        let html = DefaultSections.render_section(&cta).unwrap();
        assert!(html.contains(">Blok</h2>"));
        assert!(!html.contains("Config"));
    }

    #[test]
    fn test_render_block_skips_unknown_type() {
        let block = ContentBlock::new(BlockType::Unknown("slider".into()), Some("home"), 0);
        assert!(render_block(&block, &DefaultSections, &NoMedia).unwrap().is_none());
    }

    #[test]
    fn test_render_blocks_preserves_order_and_isolates_failures() {
        let hero = ContentBlock::new(BlockType::Hero, Some("home"), 0);
        let faq = ContentBlock::new(BlockType::Faq, Some("home"), 1);
        let gallery = ContentBlock::new(BlockType::Gallery, Some("home"), 2);
        let unknown = ContentBlock::new(BlockType::Unknown("slider".into()), Some("home"), 3);
        let custom_block = custom(json!({}));
        let tips = ContentBlock::new(BlockType::Tips, Some("home"), 5);
        let expected = vec![hero.id, custom_block.id, tips.id];

        let blocks = vec![hero, faq, gallery, unknown, custom_block, tips];
        let rendered = render_blocks(&blocks, &FailingSections, &NoMedia);
        let ids: Vec<Uuid> = rendered.iter().map(|s| s.block_id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_page_document() {
        let section = RenderedSection {
            block_id: Uuid::new_v4(),
            html: "<section>x</section>".to_string(),
        };
        let doc = render_page_document("Yeşil & Temiz", "home", &[section]);
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"<html lang="tr">"#));
        assert!(doc.contains("<title>Yeşil &amp; Temiz</title>"));
        assert!(doc.contains("<section>x</section>"));
    }

    #[test]
    fn test_safe_href() {
        assert_eq!(safe_href(" /iletisim "), "/iletisim");
        assert_eq!(safe_href("JavaScript:alert(1)"), "#");
        assert_eq!(safe_href("tel:+905551112233"), "tel:+905551112233");
        assert_eq!(safe_href("mailto:info@example.com"), "mailto:info@example.com");
        assert_eq!(safe_href("https://example.com/iletisim"), "https://example.com/iletisim");
        assert_eq!(safe_href("#iletisim"), "#iletisim");
        assert_eq!(safe_href("hizmetler?tab=2"), "hizmetler?tab=2");
    }

    #[test]
    fn test_safe_href_ignores_whitespace_inside_scheme() {
        assert_eq!(safe_href("java\tscript:alert(1)"), "#");
        assert_eq!(safe_href("java\nscript:alert(1)"), "#");
        assert_eq!(safe_href("\u{1}javascript:alert(1)"), "#");
        assert_eq!(safe_href("jav\r\nascript:alert(1)"), "#");
    }

    #[test]
    fn test_safe_href_rejects_unlisted_schemes() {
        assert_eq!(safe_href("data:text/html,<b>x</b>"), "#");
        assert_eq!(safe_href("vbscript:msgbox(1)"), "#");
        assert_eq!(safe_href("file:///etc/passwd"), "#");
    }

    #[test]
    fn test_button_with_obfuscated_script_link_is_neutralised() {
        let block = custom(json!({
            "button1Text": "Tıkla",
            "button1Link": "java\tscript:alert(1)"
        }));
        let html = render_custom_block(&block, &NoMedia);
        assert!(html.contains(r##"href="#""##));
        assert!(!html.contains("script:alert"));
    }

    #[test]
    fn test_css_url_cannot_close_the_quoted_string() {
        let escaped = escape_css_url("https://cdn.example.com/a'b\"c(d).jpg");
        assert_eq!(escaped, "https://cdn.example.com/a%27b%22c%28d%29.jpg");
        assert!(!escaped.contains("&#39;"));
    }

    #[test]
    fn test_background_url_with_quote_stays_inside_url() {
        let (block, mut media) = with_image(custom(json!({ "imagePosition": "background" })));
        let id = block.image_id.unwrap();
        media.insert(id, "https://cdn.example.com/x');background:red;('.jpg".to_string());
        let html = render_custom_block(&block, &media);
        assert!(html.contains("url('https://cdn.example.com/x%27%29;background:red;%28%27.jpg')"));
    }
}
