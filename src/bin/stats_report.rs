//! Stats Report - headless statistics logger
//!
//! Polls the configured snapshot source and logs the system statistics
//! whenever a new snapshot changes them, plus a periodic status line.
//!
//! Usage:
//!   DASHBOARD_CONFIG_PATH=config/dashboard_config.yaml ./stats-report
//!   ./stats-report config/dashboard_config.yaml

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use parking_lot::Mutex;
use tracing::info;

use liquity::application::{MemoizedSelector, SystemStatsModel};
use liquity::infrastructure::{build_source, Heartbeat};
use liquity::{
    init_tracing, select_balances, select_system_stats, DashboardConfig, ShutdownManager,
    StorePoller, SystemStatsView,
};
use liquity_dashboard::bin_common::{config_path_from_args, parse_args, BinaryRunner, ConfigType, RunConfig};

struct StatsReport {
    run_config: RunConfig,
    config: DashboardConfig,
    shutdown: Arc<ShutdownManager>,
    reports: Arc<AtomicU64>,
}

fn log_model(model: &SystemStatsModel) {
    for stat in model.all() {
        info!("  {:<24} {}", stat.name, stat.display_value());
    }
}

impl BinaryRunner for StatsReport {
    async fn run(&mut self) -> Result<()> {
        let source = build_source(&self.config.source)?;
        let store = StorePoller::bootstrap(source.as_ref()).await?;

        let view = SystemStatsView::new(
            self.config.connection.to_connection_info(),
            self.config.stats_options(),
        );
        let selector = Mutex::new(MemoizedSelector::new(select_system_stats));

        // Initial report from the bootstrap snapshot
        let state = store.snapshot();
        selector.lock().update(&state);
        if let Some(selection) = selector.lock().current() {
            info!("Statistics at version {}:", store.version());
            log_model(&view.render(selection, Some(&select_balances(&state))));
            self.reports.fetch_add(1, Ordering::Relaxed);
        }

        let reports = Arc::clone(&self.reports);
        let version_reader = store.clone();
        let _subscription = store.subscribe(move |state| {
            let mut selector = selector.lock();
            if !selector.update(state) {
                return;
            }
            if let Some(selection) = selector.current() {
                info!("Statistics changed at version {}:", version_reader.version());
                log_model(&view.render(selection, Some(&select_balances(state))));
                reports.fetch_add(1, Ordering::Relaxed);
            }
        });

        let mut poller = StorePoller::new(self.config.source.poll_interval());
        poller.start(source, store.clone(), self.shutdown.flag());

        let mut heartbeat = Heartbeat::new(self.run_config.heartbeat_interval_secs);
        while self.shutdown.is_running() {
            self.shutdown.interruptible_sleep(Duration::from_secs(1)).await;

            if heartbeat.should_beat() {
                info!(
                    "[Heartbeat] version={} reports={} failed_polls={}",
                    store.version(),
                    self.reports.load(Ordering::Relaxed),
                    poller.consecutive_failures()
                );
                heartbeat.beat();
            }
        }

        poller.stop().await;
        Ok(())
    }

    fn config(&self) -> &RunConfig {
        &self.run_config
    }

    fn summary(&self) -> Option<String> {
        Some(format!(
            "Statistics reports logged: {}",
            self.reports.load(Ordering::Relaxed)
        ))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config_path = config_path_from_args(&parse_args(), ConfigType::Dashboard);
    let config = DashboardConfig::load(&config_path)?;

    init_tracing(&config.log_level);
    config.log();

    let shutdown = Arc::new(ShutdownManager::new());
    shutdown.spawn_signal_handler();

    let heartbeat_secs = std::env::var("HEARTBEAT_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(300);

    let mut report = StatsReport {
        run_config: RunConfig::new("Stats Report").with_heartbeat(heartbeat_secs),
        config,
        shutdown,
        reports: Arc::new(AtomicU64::new(0)),
    };
    report.execute().await
}
