//! Configuration for the task server.
//!
//! Values are layered, highest priority first:
//! 1. CLI arguments
//! 2. Environment variables (via the clap `env` attribute)
//! 3. TOML config file (`~/.config/tasklist/config.toml`, or `--config`)
//! 4. Compiled defaults

use crate::task::ports::ChannelName;
use std::path::{Path, PathBuf};

/// Errors raised while loading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

/// Top-level TOML config file. Every field is optional.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct TaskServerConfigFile {
    server: ServerSection,
    database: DatabaseSection,
    notifications: NotificationSection,
    logging: LoggingSection,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerSection {
    bind_addr: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct DatabaseSection {
    url: Option<String>,
    pool_size: Option<u32>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct NotificationSection {
    enabled: Option<bool>,
    channel: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct LoggingSection {
    level: Option<String>,
}

/// Command-line arguments for `tasklist-server`.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Task list HTTP server")]
pub struct TaskServerCliArgs {
    /// Address to bind the HTTP server to.
    #[arg(short, long, env = "TASKS_BIND")]
    pub bind: Option<String>,

    /// Path to the config file (default: `~/.config/tasklist/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// `PostgreSQL` connection URL; tasks are kept in memory when unset.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(long)]
    pub pool_size: Option<u32>,

    /// Channel task events are published on.
    #[arg(long)]
    pub notification_channel: Option<String>,

    /// Enable or disable task event notifications.
    #[arg(long, env = "TASKS_NOTIFICATIONS")]
    pub notifications: Option<bool>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, env = "TASKS_LOG")]
    pub log_level: Option<String>,
}

/// Fully resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskServerConfig {
    /// Socket address to listen on, e.g. `127.0.0.1:8000`.
    pub bind_addr: String,
    /// `PostgreSQL` URL, or `None` for the in-memory store.
    pub database_url: Option<String>,
    /// Connection pool size for the `PostgreSQL` store.
    pub pool_size: u32,
    /// Channel task events are published on.
    pub notification_channel: ChannelName,
    /// Whether task events are published and consumed at all.
    pub notifications_enabled: bool,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for TaskServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_owned(),
            database_url: None,
            pool_size: 8,
            notification_channel: ChannelName::default(),
            notifications_enabled: true,
            log_level: "info".to_owned(),
        }
    }
}

impl TaskServerConfig {
    /// Loads configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// An explicit `--config` path must exist. Without one, the default
    /// path is tried and a missing file counts as empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the config file cannot be read or parsed.
    pub fn load(cli: &TaskServerCliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, file))
    }

    fn resolve(cli: &TaskServerCliArgs, file: TaskServerConfigFile) -> Self {
        let defaults = Self::default();
        let TaskServerConfigFile {
            server,
            database,
            notifications,
            logging,
        } = file;

        Self {
            bind_addr: cli
                .bind
                .clone()
                .or(server.bind_addr)
                .unwrap_or(defaults.bind_addr),
            database_url: cli.database_url.clone().or(database.url),
            pool_size: cli
                .pool_size
                .or(database.pool_size)
                .unwrap_or(defaults.pool_size),
            notification_channel: cli
                .notification_channel
                .clone()
                .or(notifications.channel)
                .map_or(defaults.notification_channel, ChannelName::new),
            notifications_enabled: cli
                .notifications
                .or(notifications.enabled)
                .unwrap_or(defaults.notifications_enabled),
            log_level: cli
                .log_level
                .clone()
                .or(logging.level)
                .unwrap_or(defaults.log_level),
        }
    }
}

fn load_config_file(explicit_path: Option<&Path>) -> Result<TaskServerConfigFile, ConfigError> {
    if let Some(path) = explicit_path {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(TaskServerConfigFile::default());
    };
    let path = config_dir.join("tasklist").join("config.toml");
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Ok(TaskServerConfigFile::default())
        }
        Err(source) => Err(ConfigError::ReadFile { path, source }),
    }
}
