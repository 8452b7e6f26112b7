//! Client configuration.
//!
//! The API key is always injected: either passed to `ClientConfig::new` by the
//! host, or read from the environment (optionally seeded from a `.env` file).

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_LANGUAGE: &str = "pt-BR";

/// Connection settings for the search API.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    pub images: ImageConfig,
}

/// Where poster and backdrop images are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    pub base_url: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            images: ImageConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_image_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.images.base_url = base_url.into();
        self
    }

    /// Load settings from the process environment.
    ///
    /// A `.env` file in the working directory is read first if one exists.
    /// `TMDB_API_KEY` is required; `TMDB_BASE_URL`, `TMDB_IMAGE_BASE_URL` and
    /// `TMDB_LANGUAGE` fall back to the TMDB defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("TMDB_API_KEY").ok_or(ConfigError::MissingApiKey)?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::Empty { name: "TMDB_API_KEY" });
        }

        let mut config = Self::new(api_key.trim());
        if let Some(base_url) = optional(&lookup, "TMDB_BASE_URL")? {
            config = config.with_base_url(base_url);
        }
        if let Some(image_base_url) = optional(&lookup, "TMDB_IMAGE_BASE_URL")? {
            config = config.with_image_base_url(image_base_url);
        }
        if let Some(language) = optional(&lookup, "TMDB_LANGUAGE")? {
            config = config.with_language(language);
        }

        tracing::debug!(
            base_url = %config.base_url,
            language = %config.language,
            "loaded client config"
        );
        Ok(config)
    }
}

fn optional(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<String>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { name }),
        Some(value) => Ok(Some(value.trim().to_string())),
    }
}

// The API key stays out of debug output.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("images", &self.images)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn new_uses_tmdb_defaults() {
        let config = ClientConfig::new("key");
        assert_eq!(config.base_url, "https://api.themoviedb.org");
        assert_eq!(config.language, "pt-BR");
        assert_eq!(config.images.base_url, "https://image.tmdb.org/t/p");
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn blank_api_key_is_an_error() {
        let err = ClientConfig::from_lookup(lookup(&[("TMDB_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Empty { name: "TMDB_API_KEY" }));
    }

    #[test]
    fn overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TMDB_API_KEY", "abc"),
            ("TMDB_BASE_URL", "http://127.0.0.1:3000"),
            ("TMDB_LANGUAGE", "en-US"),
            ("TMDB_IMAGE_BASE_URL", "http://img.local/t/p"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.language, "en-US");
        assert_eq!(config.images.base_url, "http://img.local/t/p");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let rendered = format!("{:?}", ClientConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
