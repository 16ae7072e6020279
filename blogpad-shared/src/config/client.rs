use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use url::Url;

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Storage key the session token lives under.
pub const DEFAULT_TOKEN_KEY: &str = "token";
/// How long success and error banners stay visible.
pub const DEFAULT_BANNER_TIMEOUT_MS: u64 = 3000;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported configuration format; use 'yaml' or 'json'")]
    UnsupportedFormat,
    #[error("malformed YAML configuration: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error("malformed JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {name} value: {message}")]
    Environment { name: &'static str, message: String },
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Backend endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every API path is resolved against.
    pub base_url: Url,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }
}

/// Where the session token is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Key of the token inside the store.
    pub token_key: String,

    /// File backing the token store; defaults to the user config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            store_path: None,
        }
    }
}

impl SessionConfig {
    /// Resolved token file location.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(default_store_path)
    }
}

/// Location of the token file when none is configured.
#[must_use]
pub fn default_store_path() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("blogpad").join("session.token"))
        .unwrap_or_else(|| PathBuf::from("./session.token"))
}

/// Presentation timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Milliseconds before a banner clears itself.
    pub banner_timeout_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            banner_timeout_ms: DEFAULT_BANNER_TIMEOUT_MS,
        }
    }
}

impl UiConfig {
    #[must_use]
    pub fn banner_timeout(&self) -> Duration {
        Duration::from_millis(self.banner_timeout_ms)
    }
}

/// Log level and output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// The main configuration structure for Blogpad clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Generates a default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// Precedence, lowest first: defaults, the file, `BLOGPAD_*` variables
    /// (only for values the file left at their default), then
    /// `base_url_override`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, an environment
    /// variable is malformed, or the resolved configuration is invalid.
    pub fn load_config(
        config_path: Option<PathBuf>,
        base_url_override: Option<Url>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => Self::with_defaults(),
        };

        config.apply_env_overrides()?;

        if let Some(base_url) = base_url_override {
            config.api.base_url = base_url;
        }

        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(serde_yml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(ConfigError::UnsupportedFormat),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let defaults = Self::with_defaults();

        if self.api.base_url == defaults.api.base_url
            && let Ok(value) = env::var("BLOGPAD_API_BASE_URL")
        {
            self.api.base_url = Url::parse(&value).map_err(|err| ConfigError::Environment {
                name: "BLOGPAD_API_BASE_URL",
                message: err.to_string(),
            })?;
        }
        if self.session.token_key == defaults.session.token_key
            && let Ok(value) = env::var("BLOGPAD_TOKEN_KEY")
        {
            self.session.token_key = value;
        }
        if self.session.store_path.is_none()
            && let Ok(value) = env::var("BLOGPAD_SESSION_PATH")
        {
            self.session.store_path = Some(PathBuf::from(value));
        }
        if self.ui.banner_timeout_ms == defaults.ui.banner_timeout_ms
            && let Ok(value) = env::var("BLOGPAD_BANNER_TIMEOUT_MS")
        {
            self.ui.banner_timeout_ms =
                value.parse().map_err(|_| ConfigError::Environment {
                    name: "BLOGPAD_BANNER_TIMEOUT_MS",
                    message: "must be a whole number of milliseconds".to_string(),
                })?;
        }
        if self.logging.level == defaults.logging.level
            && let Ok(value) = env::var("BLOGPAD_LOG_LEVEL")
        {
            self.logging.level = value;
        }
        if self.logging.format == defaults.logging.format
            && let Ok(value) = env::var("BLOGPAD_LOG_FORMAT")
        {
            self.logging.format = match value.to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::Environment {
                        name: "BLOGPAD_LOG_FORMAT",
                        message: "use 'text' or 'json'".to_string(),
                    });
                }
            };
        }

        Ok(())
    }

    /// Validate the resolved configuration.
    ///
    /// # Errors
    /// Returns every problem found, one message per entry.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !matches!(self.api.base_url.scheme(), "http" | "https") {
            errors.push(format!(
                "API base URL must use http or https, got '{}'",
                self.api.base_url.scheme()
            ));
        }
        if self.session.token_key.trim().is_empty() {
            errors.push("Session token key must not be empty.".to_string());
        }
        if self.ui.banner_timeout_ms == 0 {
            errors.push("Banner timeout must be greater than 0.".to_string());
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            errors.push(format!("Unknown log level '{}'.", self.logging.level));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
