//! Configuration loading and CMS base URL resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Environment variable holding the CMS base URL
pub const CMS_URL_ENV: &str = "GALLERY_CMS_URL";

/// Environment variable overriding the TOML config file location
pub const CONFIG_PATH_ENV: &str = "GALLERY_CONFIG";

/// Default HTTP timeout for CMS requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent sent to the CMS
pub const DEFAULT_USER_AGENT: &str = concat!("gallery-content/", env!("CARGO_PKG_VERSION"));

/// URL schemes that mark a media URL as already absolute
const ABSOLUTE_SCHEMES: &[&str] = &["http://", "https://", "data:", "blob:"];

/// Validated CMS base URL without trailing slashes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Parse a configured base URL
    ///
    /// Surrounding whitespace and trailing `/` are removed. The remainder must
    /// be a well-formed `http` or `https` URL with a host.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim().trim_end_matches('/');

        let parsed = reqwest::Url::parse(trimmed)
            .map_err(|e| Error::Config(format!("Invalid CMS base URL {:?}: {}", raw, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "CMS base URL must start with http:// or https:// (got {:?})",
                raw
            )));
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(Error::Config(format!("CMS base URL has no host: {:?}", raw)));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join a path onto the base URL, inserting exactly one `/`
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }

    /// Resolve a media URL to an absolute one
    ///
    /// Absolute URLs (recognised scheme) pass through unchanged,
    /// protocol-relative URLs get `https:`, anything else is prefixed with
    /// the base URL.
    pub fn absolutize(&self, url: &str) -> String {
        let lower = url.to_ascii_lowercase();
        if ABSOLUTE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
            return url.to_string();
        }
        if url.starts_with("//") {
            return format!("https:{}", url);
        }
        self.join(url)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// On-disk TOML configuration
///
/// Every key is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// CMS base URL
    pub cms_url: Option<String>,
    /// Request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// User-Agent override
    pub user_agent: Option<String>,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Load a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Explicit configuration handed to the content fetcher
#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// CMS base URL; absent when nothing configured it
    pub base_url: Option<BaseUrl>,
    /// Per-request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Logging configuration carried along from the TOML file
    pub logging: LoggingConfig,
}

impl CmsConfig {
    /// Configuration with a known base URL and default settings
    pub fn with_base_url(base_url: BaseUrl) -> Self {
        Self {
            base_url: Some(base_url),
            ..Self::default()
        }
    }

    /// Base URL, or a configuration error when none was provided
    pub fn require_base_url(&self) -> Result<&BaseUrl> {
        self.base_url.as_ref().ok_or_else(|| {
            Error::Config(format!(
                "CMS base URL is not set. Configure it using one of:\n\
                 1. Environment: {}=https://cms.example.com\n\
                 2. TOML config: {} (cms_url = \"https://cms.example.com\")",
                CMS_URL_ENV,
                default_config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "gallery/config.toml".to_string())
            ))
        })
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Default TOML config location (`<config_dir>/gallery/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gallery").join("config.toml"))
}

/// Resolves [`CmsConfig`] from its sources
///
/// Priority order for the base URL:
/// 1. Explicit value from the caller (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. None
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    env_var: String,
    config_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        let config_path = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .map(PathBuf::from)
            .or_else(default_config_path);

        Self {
            env_var: CMS_URL_ENV.to_string(),
            config_path,
        }
    }

    /// Read the TOML file from an explicit path instead of the default one
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Read the base URL from a different environment variable
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Resolve the configuration
    ///
    /// A missing or unreadable TOML file is not an error: it is logged and
    /// defaults apply. A base URL that is present but malformed is an error.
    pub fn resolve(&self, explicit_url: Option<&str>) -> Result<CmsConfig> {
        let toml_config = self.read_toml();

        let (raw_url, source) = if let Some(url) = explicit_url.filter(|u| !u.trim().is_empty()) {
            (Some(url.to_string()), "caller")
        } else if let Some(url) = std::env::var(&self.env_var)
            .ok()
            .filter(|u| !u.trim().is_empty())
        {
            (Some(url), "environment")
        } else if let Some(url) = toml_config
            .cms_url
            .clone()
            .filter(|u| !u.trim().is_empty())
        {
            (Some(url), "TOML")
        } else {
            (None, "none")
        };

        let base_url = match raw_url {
            Some(raw) => {
                let url = BaseUrl::parse(&raw)?;
                info!(base_url = %url, source, "CMS base URL resolved");
                Some(url)
            }
            None => {
                warn!("CMS base URL not configured");
                None
            }
        };

        let mut config = CmsConfig {
            base_url,
            logging: toml_config.logging,
            ..CmsConfig::default()
        };
        if let Some(secs) = toml_config.request_timeout_secs.filter(|s| *s > 0) {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = toml_config.user_agent.filter(|a| !a.trim().is_empty()) {
            config.user_agent = agent;
        }

        Ok(config)
    }

    fn read_toml(&self) -> TomlConfig {
        let Some(path) = self.config_path.as_deref() else {
            return TomlConfig::default();
        };

        if !path.exists() {
            debug!(path = %path.display(), "No TOML config file, using defaults");
            return TomlConfig::default();
        }

        match load_toml_config(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), "Ignoring unreadable TOML config: {}", e);
                TomlConfig::default()
            }
        }
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trims_trailing_slashes() {
        let url = BaseUrl::parse("https://cms.example.com///").unwrap();
        assert_eq!(url.as_str(), "https://cms.example.com");
    }

    #[test]
    fn test_base_url_rejects_missing_scheme() {
        assert!(BaseUrl::parse("cms.example.com").is_err());
        assert!(BaseUrl::parse("ftp://cms.example.com").is_err());
        assert!(BaseUrl::parse("https://").is_err());
    }

    #[test]
    fn test_base_url_rejects_malformed_host() {
        assert!(BaseUrl::parse("https://exa mple.com").is_err());
        assert!(BaseUrl::parse("http://cms example").is_err());
        assert!(BaseUrl::parse("https://[::1").is_err());
        assert!(BaseUrl::parse("https://cms.example.com:1337/strapi").is_ok());
    }

    #[test]
    fn test_join_inserts_single_slash() {
        let url = BaseUrl::parse("http://localhost:1337/").unwrap();
        assert_eq!(url.join("/api/exhibitions"), "http://localhost:1337/api/exhibitions");
        assert_eq!(url.join("api/exhibitions"), "http://localhost:1337/api/exhibitions");
    }

    #[test]
    fn test_absolutize_relative_url() {
        let url = BaseUrl::parse("https://cms.example.com").unwrap();
        assert_eq!(
            url.absolutize("/uploads/a.jpg"),
            "https://cms.example.com/uploads/a.jpg"
        );
    }

    #[test]
    fn test_absolutize_passes_absolute_urls_through() {
        let url = BaseUrl::parse("https://cms.example.com").unwrap();
        assert_eq!(
            url.absolutize("https://res.cloudinary.com/x/a.webp"),
            "https://res.cloudinary.com/x/a.webp"
        );
        assert_eq!(url.absolutize("HTTP://img.test/a.png"), "HTTP://img.test/a.png");
        assert_eq!(url.absolutize("data:image/png;base64,AA"), "data:image/png;base64,AA");
    }

    #[test]
    fn test_absolutize_protocol_relative() {
        let url = BaseUrl::parse("http://cms.example.com").unwrap();
        assert_eq!(url.absolutize("//cdn.test/a.jpg"), "https://cdn.test/a.jpg");
    }

    #[test]
    fn test_require_base_url_missing_is_config_error() {
        let config = CmsConfig::default();
        match config.require_base_url() {
            Err(Error::Config(msg)) => assert!(msg.contains(CMS_URL_ENV)),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_toml_config_partial_file() {
        let config: TomlConfig = toml::from_str("cms_url = \"https://a.test\"").unwrap();
        assert_eq!(config.cms_url.as_deref(), Some("https://a.test"));
        assert_eq!(config.logging.level, "info");
        assert!(config.request_timeout_secs.is_none());
    }
}
