//! Configuration module.
//!
//! Provides YAML-based configuration loading and validation for:
//! - Database settings (driver, host, port, dbname, user, password, pool)
//! - Collector settings (model name override, sysfs root)
//! - Default write strategy

mod app;
mod validation;

pub use app::{
    AppConfig, CollectorSettings, DatabaseConfig, DatabaseDriver, DEFAULT_CONFIG_PATH,
    DEFAULT_POSTGRES_PORT, DEFAULT_SQLITE_PATH,
};
pub use validation::{ConfigError, expand_env_vars};
