//! Configuration validation utilities.

use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse YAML configuration.
    #[error("failed to parse YAML config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation failed.
    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Expand environment variables in a string.
/// Supports ${VAR} and ${VAR:-default} syntax.
pub fn expand_env_vars(input: &str) -> String {
    static ENV_VAR_REGEX: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();

    let regex = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("failed to compile env var regex")
    });

    regex
        .replace_all(input, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let default_value = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var_name).unwrap_or_else(|_| default_value.to_string())
        })
        .into_owned()
}

/// Fail with a validation error naming `field` when `value` is blank.
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_env_vars_no_vars() {
        assert_eq!(expand_env_vars("hello world"), "hello world");
    }

    #[test]
    fn test_expand_env_vars_with_default() {
        let result = expand_env_vars("password: ${NONEXISTENT_DB_PASSWORD_12345:-fallback}");
        assert_eq!(result, "password: fallback");
    }

    #[test]
    fn test_expand_env_vars_missing_without_default() {
        let result = expand_env_vars("password: '${NONEXISTENT_DB_PASSWORD_67890}'");
        assert_eq!(result, "password: ''");
    }

    #[test]
    fn test_expand_env_vars_from_env() {
        // SAFETY: This test runs in isolation and only modifies a test-specific variable.
        unsafe {
            std::env::set_var("CPUINFO_TEST_VAR_EXPAND", "secret_value");
        }
        let result = expand_env_vars("password: ${CPUINFO_TEST_VAR_EXPAND}");
        assert_eq!(result, "password: secret_value");
        // SAFETY: Cleanup test variable.
        unsafe {
            std::env::remove_var("CPUINFO_TEST_VAR_EXPAND");
        }
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("database.host", "db").is_ok());
        let err = require_non_empty("database.host", "  ").unwrap_err();
        assert!(err.to_string().contains("database.host must not be empty"));
    }
}
