//! Site configuration — a TOML document embedded into the page bundle.
//!
//! Every field has a sensible default so the document may be empty.

use std::str::FromStr;

use labsindex_domain::access_request::IssueTracker;
use labsindex_domain::animation::DEFAULT_THRESHOLD;
use serde::Deserialize;
use url::Url;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Where access requests are filed.
    pub issue_tracker: IssueTrackerConfig,
    /// Username existence check.
    pub username_lookup: UsernameLookupConfig,
    /// Entrance animations.
    pub animation: AnimationConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Issue tracker settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IssueTrackerConfig {
    /// "New issue" page that accepts `title`, `body` and `labels`.
    pub new_issue_url: String,
    /// Label attached to every access request.
    pub label: String,
}

/// Username lookup settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UsernameLookupConfig {
    /// Endpoint prefix; the username is appended as a path segment.
    pub base_url: String,
    /// Abort the lookup after this many milliseconds.
    pub timeout_ms: u32,
}

/// Entrance animation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Visible fraction that triggers the reveal.
    pub threshold: f64,
}

/// Logging settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
}

impl SiteConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Validation`] for out-of-range values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.issue_tracker()?;
        self.lookup_base_url()?;
        if self.username_lookup.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "username_lookup.timeout_ms must be non-zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.animation.threshold) {
            return Err(ConfigError::Validation(
                "animation.threshold must be between 0 and 1".to_string(),
            ));
        }
        self.log_level()?;
        Ok(())
    }

    /// The issue tracker as a domain value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `new_issue_url` does not parse.
    pub fn issue_tracker(&self) -> Result<IssueTracker, ConfigError> {
        Ok(IssueTracker {
            new_issue_url: Url::parse(&self.issue_tracker.new_issue_url)?,
            label: self.issue_tracker.label.clone(),
        })
    }

    fn lookup_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.username_lookup.base_url)?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::Validation(
                "username_lookup.base_url cannot take path segments".to_string(),
            ));
        }
        Ok(url)
    }

    /// Lookup endpoint for `username`, percent-encoded as one path segment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configured base URL is unusable.
    pub fn lookup_url(&self, username: &str) -> Result<Url, ConfigError> {
        let mut url = self.lookup_base_url()?;
        url.path_segments_mut()
            .map_err(|()| {
                ConfigError::Validation("username_lookup.base_url cannot take path segments".to_string())
            })?
            .pop_if_empty()
            .push(username);
        Ok(url)
    }

    /// The configured maximum log level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an unknown level name.
    pub fn log_level(&self) -> Result<tracing::Level, ConfigError> {
        tracing::Level::from_str(&self.logging.level).map_err(|_| {
            ConfigError::Validation(format!("unknown log level {:?}", self.logging.level))
        })
    }
}

impl Default for IssueTrackerConfig {
    fn default() -> Self {
        Self {
            new_issue_url: "https://github.com/gamaware/cloud-devops-labs-index/issues/new"
                .to_string(),
            label: "access-request".to_string(),
        }
    }
}

impl Default for UsernameLookupConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com/users/".to_string(),
            timeout_ms: 5000,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse site configuration")]
    Parse(#[from] toml::de::Error),
    /// A configured URL does not parse.
    #[error("invalid url in site configuration")]
    InvalidUrl(#[from] url::ParseError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
