//! Statistics Dashboard
//!
//! Terminal UI rendering the statistics panel and the trove panel from the
//! latest store snapshot.

pub mod app;
pub mod ui;

pub use app::{App, Focus, TrovePanel};
