//! MapQuest client configuration

use std::collections::BTreeMap;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::endpoint::DataTier;
use crate::urlencoding;

/// Configuration for a [`MapQuestClient`](crate::MapQuestClient)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapQuestConfig {
    /// MapQuest developer API key (sensitive - uses `SecretString`)
    ///
    /// May be given percent-encoded, as copied from a URL.
    #[serde(default = "default_api_key", skip_serializing)]
    pub api_key: SecretString,

    /// Which data tier to query (`open` or `licensed`)
    #[serde(default)]
    pub data: DataTier,

    /// Use HTTPS instead of HTTP
    #[serde(default)]
    pub ssl: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra request headers (e.g. a custom `User-Agent`)
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Scheme and authority overriding the tier host, e.g. a local mock server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_api_key() -> SecretString {
    SecretString::from(String::new())
}

const fn default_timeout_secs() -> u64 {
    60
}

impl Default for MapQuestConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            data: DataTier::default(),
            ssl: false,
            timeout_secs: default_timeout_secs(),
            headers: BTreeMap::new(),
            base_url: None,
        }
    }
}

impl MapQuestConfig {
    /// Create a configuration with the given API key and defaults otherwise
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Self::new("test-key")
        }
    }

    /// Replace the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = SecretString::from(api_key.into());
        self
    }

    /// Select the data tier
    #[must_use]
    pub fn with_data(mut self, data: DataTier) -> Self {
        self.data = data;
        self
    }

    /// Enable or disable HTTPS
    #[must_use]
    pub fn with_ssl(mut self, ssl: bool) -> Self {
        self.ssl = ssl;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Add a request header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Send requests to `base_url` instead of the tier host
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// API key as it is sent on the wire, percent-decoded if needed
    #[must_use]
    pub fn resolved_api_key(&self) -> SecretString {
        let raw = self.api_key.expose_secret();
        if urlencoding::is_encoded(raw) {
            SecretString::from(urlencoding::decode(raw))
        } else {
            self.api_key.clone()
        }
    }

    /// Load configuration from `mapquest.toml` (optional) and `MAPQUEST_*`
    /// environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(config::File::with_name("mapquest"))
    }

    /// Load configuration from the given file (optional) and `MAPQUEST_*`
    /// environment variables
    ///
    /// Environment variables take precedence, e.g. `MAPQUEST_API_KEY`,
    /// `MAPQUEST_DATA`, `MAPQUEST_SSL`, `MAPQUEST_TIMEOUT_SECS`.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::load_with(config::File::from(path.as_ref()))
    }

    fn load_with(
        file: config::File<config::FileSourceFile, config::FileFormat>,
    ) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(file.required(false))
            .add_source(config::Environment::with_prefix("MAPQUEST").try_parsing(true));

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err("api_key must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if let Some(base_url) = &self.base_url
            && base_url.trim().is_empty()
        {
            return Err("base_url must not be empty when set".to_string());
        }

        Ok(())
    }
}
