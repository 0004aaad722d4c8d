//! Selectors
//!
//! Pure projections from the full store state onto the fields one view needs.
//! Selections compare structurally, so an unchanged projection lets the caller
//! skip recomputing its statistics.

use crate::domain::{Decimal, LiquityStoreState, Trove};

/// Plain selector function, storable without boxing
pub type SelectorFn<T> = fn(&LiquityStoreState) -> T;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemStatsSelection {
    pub number_of_troves: u64,
    pub price: Decimal,
    pub total: Trove,
    pub lusd_in_stability_pool: Decimal,
    pub borrowing_rate: Decimal,
    pub redemption_rate: Decimal,
    pub total_staked_lqty: Decimal,
    /// Only present when the frontend is registered
    pub kickback_rate: Option<Decimal>,
}

pub fn select_system_stats(state: &LiquityStoreState) -> SystemStatsSelection {
    let protocol = &state.protocol;
    SystemStatsSelection {
        number_of_troves: protocol.number_of_troves,
        price: protocol.price,
        total: protocol.total,
        lusd_in_stability_pool: protocol.lusd_in_stability_pool,
        borrowing_rate: protocol.borrowing_rate,
        redemption_rate: protocol.redemption_rate,
        total_staked_lqty: protocol.total_staked_lqty,
        kickback_rate: protocol.frontend.kickback_rate(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancesSelection {
    pub account_balance: Decimal,
    pub lusd_balance: Decimal,
    pub lqty_balance: Decimal,
}

pub fn select_balances(state: &LiquityStoreState) -> BalancesSelection {
    BalancesSelection {
        account_balance: state.account.account_balance,
        lusd_balance: state.account.lusd_balance,
        lqty_balance: state.account.lqty_balance,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidatedTroveSelection {
    pub has_surplus_collateral: bool,
}

pub fn select_liquidated_trove(state: &LiquityStoreState) -> LiquidatedTroveSelection {
    LiquidatedTroveSelection {
        has_surplus_collateral: !state.account.collateral_surplus_balance.is_zero(),
    }
}

/// Caches the last selection and reports whether a new state changed it
pub struct MemoizedSelector<T, F>
where
    F: Fn(&LiquityStoreState) -> T,
{
    selector: F,
    last: Option<T>,
}

impl<T, F> MemoizedSelector<T, F>
where
    T: PartialEq,
    F: Fn(&LiquityStoreState) -> T,
{
    pub fn new(selector: F) -> Self {
        Self { selector, last: None }
    }

    /// Re-run the selector; returns true when the selection differs from the last one
    pub fn update(&mut self, state: &LiquityStoreState) -> bool {
        let selected = (self.selector)(state);
        if self.last.as_ref() == Some(&selected) {
            return false;
        }
        self.last = Some(selected);
        true
    }

    pub fn current(&self) -> Option<&T> {
        self.last.as_ref()
    }
}
