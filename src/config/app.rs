//! Application configuration structures.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::collector::SystemCpuCollector;
use crate::collector::cpufreq::DEFAULT_SYSFS_ROOT;
use crate::storage::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_CONNECTIONS, StorageBuilder, WriteMode};

use super::validation::{ConfigError, expand_env_vars, require_non_empty};

// =============================================================================
// Constants
// =============================================================================

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

/// Default PostgreSQL port.
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Default SQLite database file.
pub const DEFAULT_SQLITE_PATH: &str = "cpu_info.db";

// =============================================================================
// Database Configuration
// =============================================================================

/// Database backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DatabaseDriver {
    #[default]
    Postgres,
    Sqlite,
}

/// Database configuration.
///
/// `host`, `port`, `dbname`, `user` and `password` apply to PostgreSQL; `path`
/// applies to SQLite.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Backend (default: postgres).
    pub driver: DatabaseDriver,

    /// Server host (default: "localhost").
    pub host: String,

    /// Server port (default: 5432).
    pub port: u16,

    /// Database name.
    pub dbname: String,

    /// Login role.
    pub user: String,

    /// Password. Use `${VAR}` to keep it out of the file.
    pub password: String,

    /// SQLite database file (default: "cpu_info.db").
    pub path: String,

    /// Query pool size (default: 2).
    pub max_connections: u32,

    /// Connection timeout (default: 10s).
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Create the `cpu_info` table if missing (default: false).
    pub init_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: DatabaseDriver::default(),
            host: "localhost".to_string(),
            port: DEFAULT_POSTGRES_PORT,
            dbname: String::new(),
            user: String::new(),
            password: String::new(),
            path: DEFAULT_SQLITE_PATH.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            init_schema: false,
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("driver", &self.driver)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("path", &self.path)
            .field("max_connections", &self.max_connections)
            .field("connect_timeout", &self.connect_timeout)
            .field("init_schema", &self.init_schema)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for DatabaseConfig {
    /// Connection summary for logs, without credentials.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.driver {
            DatabaseDriver::Postgres => write!(
                f,
                "postgres://{}@{}:{}/{}",
                self.user, self.host, self.port, self.dbname
            ),
            DatabaseDriver::Sqlite => write!(f, "sqlite:{}", self.path),
        }
    }
}

impl DatabaseConfig {
    /// Validate the settings the selected driver needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.driver {
            DatabaseDriver::Postgres => {
                require_non_empty("database.host", &self.host)?;
                require_non_empty("database.dbname", &self.dbname)?;
                require_non_empty("database.user", &self.user)?;
                if self.port == 0 {
                    return Err(ConfigError::ValidationError(
                        "database.port must be non-zero".to_string(),
                    ));
                }
            }
            DatabaseDriver::Sqlite => require_non_empty("database.path", &self.path)?,
        }

        if self.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be positive".to_string(),
            ));
        }
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "database.connect_timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Connectivity provider for these settings.
    pub fn storage_builder(&self) -> StorageBuilder {
        let builder = match self.driver {
            DatabaseDriver::Postgres => StorageBuilder::postgres(
                &self.host,
                self.port,
                &self.dbname,
                &self.user,
                &self.password,
            ),
            DatabaseDriver::Sqlite => StorageBuilder::sqlite(&self.path),
        };

        builder
            .max_connections(self.max_connections)
            .connect_timeout(self.connect_timeout)
            .init_schema(self.init_schema)
    }
}

// =============================================================================
// Collector Configuration
// =============================================================================

/// Collector settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorSettings {
    /// Model name to report instead of the OS brand string.
    pub model_name: Option<String>,

    /// sysfs mount point for cpufreq data (default: "/sys").
    pub sysfs_root: PathBuf,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            model_name: None,
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
        }
    }
}

impl CollectorSettings {
    /// Build the host collector for these settings.
    pub fn build_collector(&self) -> SystemCpuCollector {
        let collector = SystemCpuCollector::new().with_sysfs_root(&self.sysfs_root);
        match &self.model_name {
            Some(name) => collector.with_model_name(name),
            None => collector,
        }
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default write strategy (default: structured).
    #[serde(default)]
    pub strategy: WriteMode,

    /// Database configuration.
    pub database: DatabaseConfig,

    /// Collector configuration.
    #[serde(default)]
    pub collector: CollectorSettings,
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// `${VAR}` / `${VAR:-default}` references are expanded before parsing.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(&expand_env_vars(content))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` if any field is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;

        if let Some(name) = &self.collector.model_name {
            require_non_empty("collector.model_name", name)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const POSTGRES_YAML: &str = r#"
strategy: raw-statement
database:
  driver: postgres
  host: db.internal
  port: 6543
  dbname: metrics
  user: collector
  password: ${CPUINFO_TEST_NO_SUCH_PASSWORD:-from-default}
  connect_timeout: 3s
collector:
  model_name: AMD Ryzen 5 7600
"#;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.driver, DatabaseDriver::Postgres);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, DEFAULT_POSTGRES_PORT);
        assert_eq!(config.path, DEFAULT_SQLITE_PATH);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert!(!config.init_schema);
    }

    #[test]
    fn test_parse_postgres_config() {
        let config = AppConfig::from_yaml(POSTGRES_YAML).unwrap();
        assert_eq!(config.strategy, WriteMode::RawStatement);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.password, "from-default");
        assert_eq!(config.database.connect_timeout, Duration::from_secs(3));
        assert_eq!(
            config.collector.model_name.as_deref(),
            Some("AMD Ryzen 5 7600")
        );
        assert_eq!(config.collector.sysfs_root, PathBuf::from("/sys"));
    }

    #[test]
    fn test_parse_sqlite_config_with_defaults() {
        let config = AppConfig::from_yaml(
            "database:\n  driver: sqlite\n  path: /var/lib/cpuinfo/cpu.db\n",
        )
        .unwrap();
        assert_eq!(config.strategy, WriteMode::Structured);
        assert_eq!(config.database.driver, DatabaseDriver::Sqlite);
        assert_eq!(config.database.to_string(), "sqlite:/var/lib/cpuinfo/cpu.db");
    }

    #[test]
    fn test_raw_alias_accepted() {
        let config = AppConfig::from_yaml(
            "strategy: raw\ndatabase:\n  driver: sqlite\n",
        )
        .unwrap();
        assert_eq!(config.strategy, WriteMode::RawStatement);
    }

    #[test]
    fn test_postgres_requires_credentials() {
        let result = AppConfig::from_yaml("database:\n  host: localhost\n  dbname: metrics\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("database.user"));
    }

    #[test]
    fn test_invalid_port_and_pool() {
        let mut config = AppConfig::from_yaml(POSTGRES_YAML).unwrap();
        config.database.port = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::from_yaml(POSTGRES_YAML).unwrap();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let result = AppConfig::from_yaml("strategy: orm\ndatabase:\n  driver: sqlite\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_display_and_debug_hide_password() {
        let config = AppConfig::from_yaml(POSTGRES_YAML).unwrap();
        assert_eq!(
            config.database.to_string(),
            "postgres://collector@db.internal:6543/metrics"
        );
        assert!(!format!("{:?}", config.database).contains("from-default"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(POSTGRES_YAML.as_bytes()).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.database.dbname, "metrics");

        assert!(matches!(
            AppConfig::load("/nonexistent/cpuinfo/config.yaml"),
            Err(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn test_driver_parse() {
        use std::str::FromStr;
        assert_eq!(DatabaseDriver::from_str("SQLite").unwrap(), DatabaseDriver::Sqlite);
        assert_eq!(DatabaseDriver::Postgres.as_ref(), "postgres");
    }
}
