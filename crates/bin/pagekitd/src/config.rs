//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `pagekit.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;

use serde::Deserialize;

use pagekit_adapter_http_axum::router::HttpConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Uploaded file storage.
    pub media: MediaConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Browser origins allowed by CORS (`*` for any).
    pub cors_origins: Vec<String>,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Media directory configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Directory uploaded files are written to.
    pub root: PathBuf,
    /// Public path the directory is served under.
    pub url_prefix: String,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `pagekit.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("pagekit.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PAGEKIT_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("PAGEKIT_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("PAGEKIT_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("PAGEKIT_CORS_ORIGINS") {
            self.server.cors_origins = split_list(&val);
        }
        if let Ok(val) = std::env::var("PAGEKIT_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("PAGEKIT_MEDIA_ROOT") {
            self.media.root = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("PAGEKIT_MEDIA_URL") {
            self.media.url_prefix = val;
        }
        if let Ok(val) = std::env::var("PAGEKIT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.media.max_upload_bytes == 0 {
            return Err(ConfigError::Validation(
                "media.max_upload_bytes must be non-zero".to_string(),
            ));
        }
        let prefix = self.media.url_prefix.trim_end_matches('/');
        if !prefix.starts_with('/') || prefix.len() < 2 {
            return Err(ConfigError::Validation(
                "media.url_prefix must be a path such as `/media`".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Settings handed to the HTTP router.
    #[must_use]
    pub fn http(&self) -> HttpConfig {
        HttpConfig {
            media_root: self.media.root.clone(),
            media_url: self.media.url_prefix.trim_end_matches('/').to_string(),
            cors_origins: self.server.cors_origins.clone(),
            max_upload_bytes: self.media.max_upload_bytes,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:pagekit.db?mode=rwc".to_string(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("media"),
            url_prefix: "/media".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "pagekitd=info,pagekit=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.url, "sqlite:pagekit.db?mode=rwc");
        assert_eq!(config.media.url_prefix, "/media");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090
            cors_origins = ['https://example.com']

            [database]
            url = 'sqlite:test.db'

            [media]
            root = '/var/lib/pagekit/media'
            url_prefix = '/uploads'
            max_upload_bytes = 1024

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.cors_origins, vec!["https://example.com"]);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.media.root, PathBuf::from("/var/lib/pagekit/media"));
        assert_eq!(config.media.url_prefix, "/uploads");
        assert_eq!(config.media.max_upload_bytes, 1024);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_upload_limit() {
        let mut config = Config::default();
        config.media.max_upload_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_relative_or_root_media_prefix() {
        let mut config = Config::default();
        config.media.url_prefix = "media".to_string();
        assert!(config.validate().is_err());

        config.media.url_prefix = "/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_format_custom_bind_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9090;
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn should_strip_trailing_slash_from_media_url() {
        let mut config = Config::default();
        config.media.url_prefix = "/media/".to_string();
        assert_eq!(config.http().media_url, "/media");
    }

    #[test]
    fn should_split_comma_separated_origins() {
        assert_eq!(
            split_list("https://a.example, https://b.example ,"),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
