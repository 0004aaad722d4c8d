//! Binary runner utilities
//!
//! Provides a standardized way to run binaries with
//! logging, heartbeat, and graceful shutdown.

use tracing::info;

/// Configuration for running a binary application
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Name of the binary (for logging)
    pub name: String,
    /// Heartbeat interval in seconds
    pub heartbeat_interval_secs: u64,
}

impl RunConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            heartbeat_interval_secs: 300, // 5 minutes default
        }
    }

    pub fn with_heartbeat(mut self, secs: u64) -> Self {
        self.heartbeat_interval_secs = secs;
        self
    }
}

/// Trait for headless binary applications
pub trait BinaryRunner {
    /// Run the application main loop
    async fn run(&mut self) -> anyhow::Result<()>;

    fn config(&self) -> &RunConfig;

    /// Summary line printed in the shutdown banner
    fn summary(&self) -> Option<String> {
        None
    }

    fn print_banner(&self) {
        let config = self.config();
        info!("");
        info!("========================================");
        info!("Starting {}", config.name);
        info!("Press Ctrl+C to stop");
        info!("========================================");
        info!("");
    }

    fn print_shutdown(&self, stats: Option<&str>) {
        let config = self.config();
        info!("");
        info!("========================================");
        info!("{} stopped gracefully", config.name);
        if let Some(stats) = stats {
            info!("{}", stats);
        }
        info!("========================================");
    }

    /// Execute the binary with banners around the main loop
    async fn execute(&mut self) -> anyhow::Result<()> {
        self.print_banner();
        let result = self.run().await;
        let summary = self.summary();
        self.print_shutdown(summary.as_deref());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        config: RunConfig,
        runs: u32,
    }

    impl BinaryRunner for Counter {
        async fn run(&mut self) -> anyhow::Result<()> {
            self.runs += 1;
            Ok(())
        }

        fn config(&self) -> &RunConfig {
            &self.config
        }

        fn summary(&self) -> Option<String> {
            Some(format!("runs: {}", self.runs))
        }
    }

    #[test]
    fn test_run_config_builder() {
        let config = RunConfig::new("test-binary").with_heartbeat(120);

        assert_eq!(config.name, "test-binary");
        assert_eq!(config.heartbeat_interval_secs, 120);
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::new("default");
        assert_eq!(config.heartbeat_interval_secs, 300);
    }

    #[tokio::test]
    async fn test_execute_runs_once() {
        let mut runner = Counter {
            config: RunConfig::new("counter"),
            runs: 0,
        };
        runner.execute().await.unwrap();
        assert_eq!(runner.runs, 1);
        assert_eq!(runner.summary().as_deref(), Some("runs: 1"));
    }
}
