use std::env;
use tracing::warn;

/// Which upstream shape this process consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    /// JSON list of channels with their broadcasts
    Api,
    /// RSS feed with pipe-delimited item titles
    Rss,
}

impl UpstreamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamKind::Api => "api",
            UpstreamKind::Rss => "rss",
        }
    }

    /// Environment variable holding the URL for this kind
    pub fn url_var(&self) -> &'static str {
        match self {
            UpstreamKind::Api => "API_URL",
            UpstreamKind::Rss => "RSS_URL",
        }
    }
}

impl std::fmt::Display for UpstreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub environment: String,
    pub static_dir: String,

    // Upstream
    pub upstream_kind: UpstreamKind,
    pub upstream_url: Option<String>,
    pub fetch_timeout_ms: u64,
    pub user_agent: String,

    // Cache
    pub cache_ttl_ms: u64,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup (environment in production)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Only an RSS URL configured: assume the feed variant
        let inferred_kind = if non_empty("API_URL").is_none() && non_empty("RSS_URL").is_some() {
            UpstreamKind::Rss
        } else {
            UpstreamKind::Api
        };

        let upstream_kind = match non_empty("UPSTREAM_KIND").map(|v| v.trim().to_lowercase()) {
            Some(kind) if kind == "rss" || kind == "feed" => UpstreamKind::Rss,
            Some(kind) if kind == "api" || kind == "json" => UpstreamKind::Api,
            Some(other) => {
                warn!(
                    "Unknown UPSTREAM_KIND '{}', using {} based on configured URLs",
                    other, inferred_kind
                );
                inferred_kind
            }
            None => inferred_kind,
        };

        Self {
            // Server
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            environment: non_empty("APP_ENV")
                .or_else(|| non_empty("NODE_ENV"))
                .unwrap_or_else(|| "production".to_string()),
            static_dir: non_empty("STATIC_DIR").unwrap_or_else(|| "public".to_string()),

            // Upstream
            upstream_kind,
            upstream_url: non_empty(upstream_kind.url_var()),
            fetch_timeout_ms: lookup("API_TIMEOUT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5_000),
            user_agent: non_empty("API_USER_AGENT")
                .unwrap_or_else(|| "German-Talkshows-API/1.0".to_string()),

            // Cache
            cache_ttl_ms: lookup("CACHE_TTL_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(2 * 60 * 60 * 1000), // 2 hours
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}
