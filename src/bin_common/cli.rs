//! CLI utilities for binaries
//!
//! Handles configuration loading and environment variables
//! for all binary executables.

use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Dashboard configuration (dashboard_config.yaml)
    Dashboard,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Dashboard => "config/dashboard_config.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        match self {
            ConfigType::Dashboard => "DASHBOARD_CONFIG_PATH",
            ConfigType::Custom(_) => "CONFIG_PATH",
        }
    }
}

/// Load configuration path from environment or use default
///
/// # Examples
/// ```
/// use liquity_dashboard::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Dashboard);
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    std::env::var(config_type.env_var_name())
        .unwrap_or_else(|_| config_type.default_path().to_string())
        .into()
}

/// Command line arguments, excluding the program name
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// Config path from the first CLI argument, falling back to the environment
///
/// Priority: CLI argument > env var > default path
pub fn config_path_from_args(args: &[String], config_type: ConfigType) -> PathBuf {
    match args.first() {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => load_config_from_env(config_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_type_paths() {
        assert_eq!(ConfigType::Dashboard.default_path(), "config/dashboard_config.yaml");

        let custom = ConfigType::Custom("custom/path.yaml".to_string());
        assert_eq!(custom.default_path(), "custom/path.yaml");
    }

    #[test]
    fn test_cli_argument_wins() {
        let args = vec!["custom/dashboard.yaml".to_string()];
        let path = config_path_from_args(&args, ConfigType::Dashboard);
        assert_eq!(path, PathBuf::from("custom/dashboard.yaml"));
    }

    #[test]
    fn test_no_argument_uses_config_type() {
        let custom = ConfigType::Custom("fallback.yaml".to_string());
        std::env::remove_var(custom.env_var_name());
        assert_eq!(config_path_from_args(&[], custom), PathBuf::from("fallback.yaml"));
    }

    #[test]
    fn test_config_type_env_vars() {
        assert_eq!(ConfigType::Dashboard.env_var_name(), "DASHBOARD_CONFIG_PATH");
        assert_eq!(ConfigType::Custom(String::new()).env_var_name(), "CONFIG_PATH");
    }
}
