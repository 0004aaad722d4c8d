//! Common test utilities for liquity integration tests

#![allow(dead_code)]

use liquity::domain::{Decimal, FrontendStatus, LiquityStoreState, Trove, TroveStatus};

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

pub fn dec(s: &str) -> Decimal {
    s.parse().expect("valid decimal literal")
}

/// Protocol state with the given totals and price; everything else zero
pub fn state_with_totals(collateral: u64, debt: u64, price: u64) -> LiquityStoreState {
    let mut state = LiquityStoreState::default();
    state.protocol.total = Trove::new(Decimal::from(collateral), Decimal::from(debt));
    state.protocol.price = Decimal::from(price);
    state
}

pub mod fixtures {
    //! Snapshot documents as a source would serve them

    use super::*;

    pub fn liquidated_account(surplus: &str) -> LiquityStoreState {
        let mut state = state_with_totals(1_000_000, 500_000, 2000);
        state.protocol.number_of_troves = 1234;
        state.protocol.lusd_in_stability_pool = dec("250000");
        state.protocol.borrowing_rate = dec("0.005");
        state.protocol.frontend = FrontendStatus::Registered { kickback_rate: dec("0.25") };
        state.account.trove_status = TroveStatus::ClosedByLiquidation;
        state.account.collateral_surplus_balance = dec(surplus);
        state
    }

    pub fn to_json(state: &LiquityStoreState) -> String {
        serde_json::to_string_pretty(state).expect("snapshot serializes")
    }
}
