//! [`Config`]-related definitions.

use std::{num::NonZeroUsize, path::PathBuf, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["http://localhost:3000".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// Remote source of users configuration.
    pub remote: Remote,

    /// Users table configuration.
    pub table: Table,

    /// Settings storage configuration.
    pub storage: Storage,

    /// Simulated latency of saving an edited user.
    #[default(time::Duration::from_millis(700))]
    #[serde(with = "humantime_serde")]
    pub save_latency: time::Duration,
}

impl From<&Service> for service::Config {
    fn from(value: &Service) -> Self {
        Self {
            page_size: value.table.page_size,
            save_latency: value.save_latency,
        }
    }
}

/// Remote source of users configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Remote {
    /// URL of the endpoint serving the JSON list of users.
    #[default("https://jsonplaceholder.typicode.com/users".to_owned())]
    pub url: String,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Remote> for service::infra::remote::http::Config {
    fn from(value: Remote) -> Self {
        let Remote { url, timeout } = value;
        Self { url, timeout }
    }
}

/// Users table configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Table {
    /// Maximum number of users on a single page.
    #[default(service::DEFAULT_PAGE_SIZE)]
    pub page_size: NonZeroUsize,
}

/// Settings storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Storage {
    /// Directory to keep the stored records in.
    #[default(PathBuf::from("data"))]
    pub dir: PathBuf,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::{fs, time::Duration};

    use super::{Config, LogLevel};

    #[test]
    fn uses_defaults_when_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = Config::new(path.to_string_lossy()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.service.table.page_size.get(), 5);
        assert_eq!(config.service.save_latency, Duration::from_millis(700));
        assert_eq!(
            config.service.remote.url,
            "https://jsonplaceholder.typicode.com/users",
        );
    }

    #[test]
    fn reads_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [service]
            save_latency = "1s"

            [service.table]
            page_size = 10

            [service.remote]
            url = "http://127.0.0.1:9000/users"
            timeout = "3s"

            [log]
            level = "DEBUG"
            "#,
        )
        .unwrap();

        let config = Config::new(path.to_string_lossy()).unwrap();

        assert_eq!(config.service.table.page_size.get(), 10);
        assert_eq!(config.service.save_latency, Duration::from_secs(1));
        assert_eq!(config.service.remote.timeout, Duration::from_secs(3));
        assert!(matches!(config.log.level, LogLevel::Debug));

        let service = service::Config::from(&config.service);
        assert_eq!(service.page_size.get(), 10);
    }
}
