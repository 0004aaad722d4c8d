//! Main application state and logic for the dashboard

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::Receiver;
use tracing::{debug, info};

use crate::application::events::{ChannelDispatcher, TroveViewEvent};
use crate::application::liquidated_trove::{
    ActionOutcome, LiquidatedTroveModel, LiquidatedTroveView, TroveAction,
};
use crate::application::selectors::{
    select_balances, select_liquidated_trove, select_system_stats, BalancesSelection,
    LiquidatedTroveSelection, MemoizedSelector, SelectorFn, SystemStatsSelection,
};
use crate::application::system_stats::{SystemStatsModel, SystemStatsOptions, SystemStatsView};
use crate::application::theme::{ButtonState, ButtonTheme};
use crate::domain::{ConnectionInfo, LiquityStoreState, Statistic, TroveStatus};
use crate::infrastructure::LiquityStore;

/// Which panel receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Statistics,
    Trove,
}

/// Right-hand panel content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrovePanel {
    Liquidated(LiquidatedTroveModel),
    Status(TroveStatus),
}

impl TrovePanel {
    pub fn action(&self) -> Option<TroveAction> {
        match self {
            TrovePanel::Liquidated(model) => Some(model.action),
            TrovePanel::Status(_) => None,
        }
    }
}

/// Main application state
pub struct App {
    store: LiquityStore,
    stats_view: SystemStatsView,
    trove_view: LiquidatedTroveView,
    stats_selector: MemoizedSelector<SystemStatsSelection, SelectorFn<SystemStatsSelection>>,
    balances_selector: MemoizedSelector<BalancesSelection, SelectorFn<BalancesSelection>>,
    trove_selector: MemoizedSelector<LiquidatedTroveSelection, SelectorFn<LiquidatedTroveSelection>>,
    trove_status: TroveStatus,
    dispatcher: ChannelDispatcher,
    events: Receiver<TroveViewEvent>,
    poll_failures: Option<Arc<AtomicU64>>,
    /// Rows of the statistics panel from the last render pass
    pub stats: SystemStatsModel,
    pub trove: TrovePanel,
    pub button_theme: ButtonTheme,
    pub focus: Focus,
    pub selected_stat: usize,
    /// Store version the current rows were computed from
    pub rendered_version: Option<u64>,
    /// Number of times statistics were recomputed
    pub recompute_count: u64,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(
        store: LiquityStore,
        connection: ConnectionInfo,
        options: SystemStatsOptions,
        button_theme: ButtonTheme,
    ) -> Self {
        let (dispatcher, events) = ChannelDispatcher::unbounded();

        let mut app = Self {
            store,
            stats_view: SystemStatsView::new(connection, options),
            trove_view: LiquidatedTroveView,
            stats_selector: MemoizedSelector::new(select_system_stats as SelectorFn<_>),
            balances_selector: MemoizedSelector::new(select_balances as SelectorFn<_>),
            trove_selector: MemoizedSelector::new(select_liquidated_trove as SelectorFn<_>),
            trove_status: TroveStatus::default(),
            dispatcher,
            events,
            poll_failures: None,
            stats: SystemStatsModel::default(),
            trove: TrovePanel::Status(TroveStatus::default()),
            button_theme,
            focus: Focus::Statistics,
            selected_stat: 0,
            rendered_version: None,
            recompute_count: 0,
            should_quit: false,
            status_message: None,
        };
        app.refresh();
        app
    }

    /// Show a stale marker while the poller is failing
    pub fn with_poll_failures(mut self, failures: Arc<AtomicU64>) -> Self {
        self.poll_failures = Some(failures);
        self
    }

    /// Pick up a newly published snapshot, recomputing only what changed
    pub fn refresh(&mut self) {
        let version = self.store.version();
        if self.rendered_version == Some(version) {
            return;
        }

        let state = self.store.snapshot();
        let stats_changed = self.stats_selector.update(&state);
        let balances_changed = self.balances_selector.update(&state);
        let trove_changed = self.trove_selector.update(&state);

        if stats_changed || balances_changed {
            self.recompute_stats();
        }
        if trove_changed || self.trove_status != state.account.trove_status {
            self.trove_status = state.account.trove_status;
            self.recompute_trove(&state);
        }

        self.rendered_version = Some(version);
    }

    fn recompute_stats(&mut self) {
        if let Some(selection) = self.stats_selector.current() {
            self.stats = self
                .stats_view
                .render(selection, self.balances_selector.current());
            self.recompute_count += 1;
            self.selected_stat = self.selected_stat.min(self.stat_count().saturating_sub(1));
            debug!("[Dashboard] Recomputed {} statistics", self.stat_count());
        }
    }

    fn recompute_trove(&mut self, state: &LiquityStoreState) {
        self.trove = match (state.account.trove_status, self.trove_selector.current()) {
            (TroveStatus::ClosedByLiquidation, Some(selection)) => {
                TrovePanel::Liquidated(self.trove_view.render(selection))
            }
            (status, _) => TrovePanel::Status(status),
        };
    }

    pub fn stat_count(&self) -> usize {
        self.stats.all().count()
    }

    pub fn selected_statistic(&self) -> Option<&Statistic> {
        self.stats.all().nth(self.selected_stat)
    }

    pub fn next_stat(&mut self) {
        let count = self.stat_count();
        if count > 0 {
            self.selected_stat = (self.selected_stat + 1) % count;
        }
    }

    pub fn prev_stat(&mut self) {
        let count = self.stat_count();
        if count > 0 {
            self.selected_stat = (self.selected_stat + count - 1) % count;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Statistics => Focus::Trove,
            Focus::Trove => Focus::Statistics,
        };
    }

    pub fn toggle_balances(&mut self) {
        let show = !self.stats_view.options().show_balances;
        self.stats_view.set_show_balances(show);
        self.recompute_stats();
        self.status_message = Some(if show { "Balances shown" } else { "Balances hidden" }.to_string());
    }

    pub fn button_state(&self) -> ButtonState {
        match (self.trove.action(), self.focus) {
            (None, _) => ButtonState::Disabled,
            (Some(_), Focus::Trove) => ButtonState::Hover,
            (Some(_), Focus::Statistics) => ButtonState::Normal,
        }
    }

    /// Activate the trove panel's action, then let the coordinator react
    pub fn activate_primary(&mut self) {
        let Some(action) = self.trove.action() else {
            self.status_message = Some("No trove action available".to_string());
            return;
        };

        match self.trove_view.activate(action, &self.dispatcher) {
            ActionOutcome::Dispatched(event) => info!("[Dashboard] {} dispatched", event),
            ActionOutcome::DelegatedToSurplusAction => {
                self.status_message =
                    Some("Claim your collateral surplus from a wallet-connected frontend".to_string());
            }
        }
        self.drain_events();
    }

    /// View-state coordination: the dashboard itself consumes trove events
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                TroveViewEvent::OpenTrovePressed => {
                    self.status_message = Some(format!(
                        "{}: opening a Trove requires a wallet-connected frontend",
                        event
                    ));
                }
            }
        }
    }

    pub fn store_version(&self) -> u64 {
        self.store.version()
    }

    pub fn is_stale(&self) -> bool {
        self.poll_failures
            .as_ref()
            .map(|f| f.load(Ordering::Acquire) > 0)
            .unwrap_or(false)
    }

    pub fn block_tag(&self) -> Option<u64> {
        self.store.snapshot().protocol.block_tag
    }
}
