use chrono::{DateTime, Utc};
use ethers::types::Address;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::application::system_stats::SystemStatsOptions;
use crate::domain::{BuildProfile, ConnectionInfo};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid environment variable {name}: {reason}")]
    InvalidEnvVar { name: &'static str, reason: String },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    pub source: SourceConfig,

    pub connection: ConnectionConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub build: BuildConfig,
}

/// Where snapshots come from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceKind {
    File { path: PathBuf },
    Http { url: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(flatten)]
    pub kind: SourceKind,

    /// Seconds between polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl SourceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_poll_interval() -> u64 {
    12 // one block
}

fn default_request_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Deployment the dashboard is connected to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub contracts_version: String,
    pub deployment_date: DateTime<Utc>,
    /// Registered frontend address; zero address when untagged
    #[serde(default)]
    pub frontend_tag: Address,
}

impl ConnectionConfig {
    pub fn to_connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            version: self.contracts_version.clone(),
            deployment_date: self.deployment_date,
            frontend_tag: self.frontend_tag,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub show_balances: bool,
    /// Kickback rate and version rows
    #[serde(default)]
    pub frontend_section_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildProfileKind {
    Development,
    #[default]
    Production,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    pub profile: BuildProfileKind,
    /// Frontend version (commit hash) for production builds
    #[serde(default)]
    pub version: Option<String>,
}

impl BuildConfig {
    pub fn to_profile(&self) -> BuildProfile {
        match self.profile {
            BuildProfileKind::Development => BuildProfile::Development,
            BuildProfileKind::Production => BuildProfile::Production {
                version: self.version.clone(),
            },
        }
    }
}

impl DashboardConfig {
    /// Load configuration from YAML file, then apply environment overrides
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let mut config = Self::from_yaml(&yaml_content)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Environment variables take precedence over the YAML file
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("SNAPSHOT_URL") {
            info!("Overriding snapshot source from SNAPSHOT_URL");
            self.source.kind = SourceKind::Http { url };
        } else if let Ok(path) = std::env::var("SNAPSHOT_PATH") {
            info!("Overriding snapshot source from SNAPSHOT_PATH");
            self.source.kind = SourceKind::File { path: path.into() };
        }

        if let Ok(tag) = std::env::var("FRONTEND_TAG") {
            self.connection.frontend_tag =
                tag.parse::<Address>().map_err(|e| ConfigError::InvalidEnvVar {
                    name: "FRONTEND_TAG",
                    reason: e.to_string(),
                })?;
        }

        if let Ok(profile) = std::env::var("BUILD_PROFILE") {
            self.build.profile = match profile.to_lowercase().as_str() {
                "development" => BuildProfileKind::Development,
                "production" => BuildProfileKind::Production,
                other => {
                    return Err(ConfigError::InvalidEnvVar {
                        name: "BUILD_PROFILE",
                        reason: format!("unknown profile '{}'", other),
                    })
                }
            };
        }

        if let Ok(version) = std::env::var("APP_VERSION") {
            self.build.version = Some(version);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.source.poll_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "poll_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.source.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if let SourceKind::Http { url } = &self.source.kind {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ValidationError(format!(
                    "snapshot url must be http(s): {}",
                    url
                )));
            }
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    pub fn stats_options(&self) -> SystemStatsOptions {
        SystemStatsOptions {
            show_balances: self.display.show_balances,
            frontend_section_enabled: self.display.frontend_section_enabled,
            build: self.build.to_profile(),
        }
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        match &self.source.kind {
            SourceKind::File { path } => info!("  Snapshot source: file {}", path.display()),
            SourceKind::Http { url } => info!("  Snapshot source: {}", url),
        }
        info!("  Poll interval: {} seconds", self.source.poll_interval_secs);
        info!("  Contracts version: {}", self.connection.contracts_version);
        info!("  Frontend tag: {:?}", self.connection.frontend_tag);
        info!("  Show balances: {}", self.display.show_balances);
        info!("  Frontend section: {}", self.display.frontend_section_enabled);
        info!("  Build profile: {:?}", self.build.profile);
        info!("  Log level: {}", self.log_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
log_level: debug
source:
  kind: file
  path: config/snapshot.json
  poll_interval_secs: 5
connection:
  contracts_version: "0123456789abcdef0123456789abcdef01234567"
  deployment_date: "2021-04-05T12:00:00Z"
display:
  show_balances: true
"#;

    #[test]
    fn test_parse_yaml() {
        let config = DashboardConfig::from_yaml(YAML).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.source.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.source.request_timeout_secs, 10);
        assert!(matches!(config.source.kind, SourceKind::File { .. }));
        assert_eq!(config.connection.frontend_tag, Address::zero());
        assert!(config.display.show_balances);
        assert!(!config.display.frontend_section_enabled);
        assert_eq!(config.build.to_profile(), BuildProfile::Production { version: None });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_source() {
        let yaml = YAML.replace(
            "kind: file\n  path: config/snapshot.json",
            "kind: http\n  url: https://example.org/snapshot",
        );
        let config = DashboardConfig::from_yaml(&yaml).unwrap();
        assert!(matches!(config.source.kind, SourceKind::Http { ref url } if url == "https://example.org/snapshot"));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = DashboardConfig::from_yaml(YAML).unwrap();
        config.source.poll_interval_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let mut config = DashboardConfig::from_yaml(YAML).unwrap();
        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stats_options() {
        let mut config = DashboardConfig::from_yaml(YAML).unwrap();
        config.build.profile = BuildProfileKind::Development;
        let options = config.stats_options();
        assert!(options.show_balances);
        assert_eq!(options.build, BuildProfile::Development);
    }
}
