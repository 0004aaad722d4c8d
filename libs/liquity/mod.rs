//! Liquity read model
//!
//! Projects the protocol state published by the store into display-ready
//! statistics: the system statistics panel, account balances and the
//! liquidated-trove screen.
//!
//! ## Architecture
//!
//! - **domain**: fixed-point amounts, snapshots, statistics
//! - **application**: selectors, views, dashboard UI
//! - **infrastructure**: store, snapshot sources, poller, config, logging

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{
    select_balances, select_liquidated_trove, select_system_stats, LiquidatedTroveView,
    SystemStatsView,
};
pub use domain::{Decimal, LiquityStoreState, Percent, Statistic, Trove};
pub use infrastructure::{init_tracing, DashboardConfig, LiquityStore, ShutdownManager, StorePoller};
