//! Liquity Dashboard - Main Library
//!
//! Entry point shared by the dashboard binaries.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI, runners)
//! - **liquity**: Read model, store and views (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use liquity_dashboard::bin_common::{load_config_from_env, ConfigType};
//! use liquity_dashboard::liquity::DashboardConfig;
//! ```

// Re-export workspace libraries for convenience
pub use liquity;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod runner;

    pub use cli::{config_path_from_args, load_config_from_env, parse_args, ConfigType};
    pub use runner::{BinaryRunner, RunConfig};
}
