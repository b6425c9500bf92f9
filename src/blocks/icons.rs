//! Icons that admins may reference by name from block config.
//!
//! Names are matched loosely: `MapPin`, `map-pin` and `map_pin` all resolve to
//! [`Icon::MapPin`]. Anything outside the set resolves to `None` and callers
//! render without an icon.

use serde::{Serialize, Serializer};

/// Path of the SVG sprite sheet served with the site assets.
pub const ICON_SPRITE_PATH: &str = "/static/icons.svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Award,
    Briefcase,
    Calendar,
    Check,
    CheckCircle,
    Clock,
    Droplet,
    Heart,
    HelpCircle,
    Home,
    Image,
    Info,
    Layout,
    Leaf,
    Lightbulb,
    ListOrdered,
    Mail,
    MapPin,
    Megaphone,
    MessageCircle,
    Phone,
    Shield,
    Sparkles,
    Star,
    Sun,
    ThumbsUp,
    Truck,
    Users,
    Wrench,
}

pub const ALL_ICONS: [Icon; 29] = [
    Icon::Award,
    Icon::Briefcase,
    Icon::Calendar,
    Icon::Check,
    Icon::CheckCircle,
    Icon::Clock,
    Icon::Droplet,
    Icon::Heart,
    Icon::HelpCircle,
    Icon::Home,
    Icon::Image,
    Icon::Info,
    Icon::Layout,
    Icon::Leaf,
    Icon::Lightbulb,
    Icon::ListOrdered,
    Icon::Mail,
    Icon::MapPin,
    Icon::Megaphone,
    Icon::MessageCircle,
    Icon::Phone,
    Icon::Shield,
    Icon::Sparkles,
    Icon::Star,
    Icon::Sun,
    Icon::ThumbsUp,
    Icon::Truck,
    Icon::Users,
    Icon::Wrench,
];

impl Icon {
    /// Sprite symbol id (kebab-case).
    pub fn slug(self) -> &'static str {
        match self {
            Icon::Award => "award",
            Icon::Briefcase => "briefcase",
            Icon::Calendar => "calendar",
            Icon::Check => "check",
            Icon::CheckCircle => "check-circle",
            Icon::Clock => "clock",
            Icon::Droplet => "droplet",
            Icon::Heart => "heart",
            Icon::HelpCircle => "help-circle",
            Icon::Home => "home",
            Icon::Image => "image",
            Icon::Info => "info",
            Icon::Layout => "layout",
            Icon::Leaf => "leaf",
            Icon::Lightbulb => "lightbulb",
            Icon::ListOrdered => "list-ordered",
            Icon::Mail => "mail",
            Icon::MapPin => "map-pin",
            Icon::Megaphone => "megaphone",
            Icon::MessageCircle => "message-circle",
            Icon::Phone => "phone",
            Icon::Shield => "shield",
            Icon::Sparkles => "sparkles",
            Icon::Star => "star",
            Icon::Sun => "sun",
            Icon::ThumbsUp => "thumbs-up",
            Icon::Truck => "truck",
            Icon::Users => "users",
            Icon::Wrench => "wrench",
        }
    }

    pub fn from_name(name: &str) -> Option<Icon> {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }
        ALL_ICONS
            .iter()
            .copied()
            .find(|icon| normalize(icon.slug()) == wanted)
    }

    /// Inline SVG referencing the sprite sheet.
    pub fn to_svg(self, class: &str) -> String {
        format!(
            r##"<svg class="icon icon-{slug} {class}" aria-hidden="true" focusable="false"><use href="{sprite}#{slug}"></use></svg>"##,
            slug = self.slug(),
            class = class,
            sprite = ICON_SPRITE_PATH,
        )
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
