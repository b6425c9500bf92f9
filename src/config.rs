//! Service configuration read from the environment (after `.env` is loaded).

use std::net::SocketAddr;

lazy_static::lazy_static! {
    /// Process-wide site settings.
    pub static ref SITE_CONFIG: SiteConfig = SiteConfig::default();
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub site_title: String,
    /// Prefix for media URLs stored as relative paths.
    pub media_base_url: String,
    /// Page served at `/`.
    pub home_page: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3001),
            site_title: std::env::var("SITE_TITLE").unwrap_or_else(|_| "Anasayfa".to_string()),
            media_base_url: std::env::var("MEDIA_BASE_URL").unwrap_or_default(),
            home_page: std::env::var("HOME_PAGE").unwrap_or_else(|_| "home".to_string()),
        }
    }
}

impl SiteConfig {
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Absolute URLs pass through; relative ones get `media_base_url` prepended.
    pub fn media_url(&self, stored: &str) -> String {
        let stored = stored.trim();
        if stored.starts_with("http://") || stored.starts_with("https://") || self.media_base_url.is_empty() {
            return stored.to_string();
        }
        format!(
            "{}/{}",
            self.media_base_url.trim_end_matches('/'),
            stored.trim_start_matches('/')
        )
    }
}
