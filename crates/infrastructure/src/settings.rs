//! Client configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `STITCH_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Default admin API host.
pub const DEFAULT_BASE_URL: &str = "https://stitch.mongodb.com";

/// Default connect/read timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Prefix of the environment variables read by [`ClientSettings::load`].
pub const ENV_PREFIX: &str = "STITCH";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    /// The base URL does not parse.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The configured value.
        url: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The base URL is not http(s).
    #[error("base URL {0:?} must use http or https")]
    UnsupportedScheme(String),
}

/// Settings for the admin API transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    /// Scheme and host of the admin API, e.g. `https://stitch.mongodb.com`.
    pub base_url: String,
    /// Connect and read timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("stitch-cli/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientSettings {
    /// Loads settings from defaults, a config file and the environment.
    ///
    /// An explicit `file` must exist. Without one, the per-user config file
    /// is read if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the result is invalid.
    pub fn load(file: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with(file, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with(file: Option<&Path>, environment: Environment) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("user_agent", defaults.user_agent)?;

        match file {
            Some(path) => builder = builder.add_source(File::from(path).required(true)),
            None => {
                if let Some(path) = Self::default_config_path() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        let settings: Self = builder
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;
        settings.base_url()?;
        Ok(settings)
    }

    /// Returns the per-user config file location, e.g.
    /// `~/.config/stitch/config.toml`.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stitch").join("config.toml"))
    }

    /// Returns the validated base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or is not http(s).
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let url = Url::parse(&self.base_url).map_err(|source| SettingsError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SettingsError::UnsupportedScheme(self.base_url.clone()));
        }
        Ok(url)
    }

    /// Returns the timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
