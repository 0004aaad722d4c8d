//! Application Layer
//!
//! Selectors, derived statistics and the views built on them.
//! This layer depends on domain and infrastructure layers.

pub mod dashboard;
pub mod events;
pub mod liquidated_trove;
pub mod selectors;
pub mod system_stats;
pub mod theme;

pub use events::{ChannelDispatcher, EventDispatcher, TroveViewEvent};
pub use liquidated_trove::{ActionOutcome, LiquidatedTroveModel, LiquidatedTroveView, TroveAction};
pub use selectors::{
    select_balances, select_liquidated_trove, select_system_stats, BalancesSelection,
    LiquidatedTroveSelection, MemoizedSelector, SystemStatsSelection,
};
pub use system_stats::{SystemStatsModel, SystemStatsOptions, SystemStatsView};
pub use theme::{ButtonSize, ButtonState, ButtonTheme, ButtonVariant};
