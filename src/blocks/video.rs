//! Video URL recognition for embeddable players.

use regex::Regex;
use serde::Serialize;

lazy_static::lazy_static! {
    /// youtube.com/watch?v=, youtu.be/, youtube.com/embed/ and /shorts/ forms
    static ref YOUTUBE_REGEX: Regex = Regex::new(
        r"^(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[?&#/].*)?$"
    )
    .unwrap();

    /// vimeo.com/<id>, vimeo.com/channels/<name>/<id> and player.vimeo.com/video/<id>
    static ref VIMEO_REGEX: Regex = Regex::new(
        r"^(?:https?://)?(?:www\.|player\.)?vimeo\.com/(?:video/|channels/[^/]+/)?(\d+)(?:[?#/].*)?$"
    )
    .unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoProvider {
    Youtube,
    Vimeo,
}

/// A recognized video, reduced to provider and id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEmbed {
    pub provider: VideoProvider,
    pub id: String,
}

impl VideoEmbed {
    pub fn embed_url(&self) -> String {
        match self.provider {
            VideoProvider::Youtube => format!("https://www.youtube.com/embed/{}", self.id),
            VideoProvider::Vimeo => format!("https://player.vimeo.com/video/{}", self.id),
        }
    }
}

/// Recognize a YouTube or Vimeo URL. Anything else is `None`.
pub fn parse_video_url(url: &str) -> Option<VideoEmbed> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    if let Some(caps) = YOUTUBE_REGEX.captures(url) {
        return Some(VideoEmbed {
            provider: VideoProvider::Youtube,
            id: caps[1].to_string(),
        });
    }

    VIMEO_REGEX.captures(url).map(|caps| VideoEmbed {
        provider: VideoProvider::Vimeo,
        id: caps[1].to_string(),
    })
}

/// Playable embed URL for a recognized video URL.
pub fn get_embed_url(url: &str) -> Option<String> {
    parse_video_url(url).map(|v| v.embed_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    const YT: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ";

    #[test]
    fn test_youtube_watch_url() {
        assert_eq!(
            get_embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some(YT)
        );
        assert_eq!(
            get_embed_url("https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42").as_deref(),
            Some(YT)
        );
        assert_eq!(
            get_embed_url("http://m.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some(YT)
        );
    }

    #[test]
    fn test_youtube_short_and_embed_urls() {
        assert_eq!(get_embed_url("https://youtu.be/dQw4w9WgXcQ").as_deref(), Some(YT));
        assert_eq!(
            get_embed_url("https://youtu.be/dQw4w9WgXcQ?si=abc").as_deref(),
            Some(YT)
        );
        assert_eq!(get_embed_url(YT).as_deref(), Some(YT));
        assert_eq!(
            get_embed_url("https://www.youtube.com/shorts/dQw4w9WgXcQ").as_deref(),
            Some(YT)
        );
    }

    #[test]
    fn test_vimeo_urls() {
        let expected = Some("https://player.vimeo.com/video/76979871");
        assert_eq!(get_embed_url("https://vimeo.com/76979871").as_deref(), expected);
        assert_eq!(
            get_embed_url("https://player.vimeo.com/video/76979871").as_deref(),
            expected
        );
        assert_eq!(
            get_embed_url("https://vimeo.com/channels/staffpicks/76979871").as_deref(),
            expected
        );
    }

    #[test]
    fn test_unrecognized_urls_are_no_video() {
        for url in [
            "",
            "   ",
            "https://example.com/video.mp4",
            "https://www.youtube.com/watch?v=short",
            "https://www.youtube.com/channel/UC123",
            "https://vimeo.com/about",
            "https://notyoutube.com/watch?v=dQw4w9WgXcQ",
            "javascript:alert(1)",
        ] {
            assert!(parse_video_url(url).is_none(), "{url} should not be a video");
        }
    }

    #[test]
    fn test_provider_is_reported() {
        let v = parse_video_url("youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(v.provider, VideoProvider::Youtube);
        assert_eq!(v.id, "dQw4w9WgXcQ");
    }
}
