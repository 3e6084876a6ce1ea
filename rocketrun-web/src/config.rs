//! Runtime configuration read from the host page.
use crate::dom;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";
/// `<meta name="rocketrun-api-base" content="...">` overrides the service address.
pub const API_BASE_META: &str = "rocketrun-api-base";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("api base is empty")]
    Empty,
    #[error("api base must be an http(s) URL or an absolute path, got {0:?}")]
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Service root without a trailing slash. Empty means same origin.
    pub api_base: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl AppConfig {
    /// # Errors
    ///
    /// Rejects blank values and anything that is neither an `http(s)://` URL
    /// nor an absolute path.
    pub fn from_api_base(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::Empty);
        }
        let absolute = raw.starts_with("http://") || raw.starts_with("https://");
        if !absolute && !raw.starts_with('/') {
            return Err(ConfigError::Unsupported(raw.to_string()));
        }
        Ok(Self {
            api_base: raw.trim_end_matches('/').to_string(),
        })
    }

    /// Config from an optional meta tag value, falling back to the default.
    #[must_use]
    pub fn from_meta(content: Option<&str>) -> Self {
        content.map_or_else(Self::default, |raw| {
            Self::from_api_base(raw).unwrap_or_else(|err| {
                log::warn!("Ignoring {API_BASE_META}: {err}");
                Self::default()
            })
        })
    }

    /// Read the config from the current document.
    ///
    /// # Panics
    /// Panics outside a browser, see [`dom::document`].
    #[must_use]
    pub fn load() -> Self {
        Self::from_meta(dom::meta_content(API_BASE_META).as_deref())
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}
