//! Liquidated trove view
//!
//! Stateless reaction to two facts: the trove was liquidated, and the account
//! may or may not have collateral left to reclaim. Exactly one action is
//! offered.

use super::events::{EventDispatcher, TroveViewEvent};
use super::selectors::LiquidatedTroveSelection;

pub const HEADING: &str = "Trove";
pub const LIQUIDATED_TITLE: &str = "Your Trove has been liquidated.";
const RECLAIM_MESSAGE: &str =
    "Please reclaim your remaining collateral before opening a new Trove.";
const OPEN_MESSAGE: &str = "You can borrow LUSD by opening a Trove.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TroveAction {
    /// Handled by the collateral surplus component
    ReclaimCollateral,
    OpenTrove,
}

impl TroveAction {
    pub fn label(&self) -> &'static str {
        match self {
            TroveAction::ReclaimCollateral => "Claim collateral",
            TroveAction::OpenTrove => "Open Trove",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidatedTroveModel {
    pub heading: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub action: TroveAction,
}

/// What activating an action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Dispatched(TroveViewEvent),
    DelegatedToSurplusAction,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LiquidatedTroveView;

impl LiquidatedTroveView {
    pub fn render(&self, selection: &LiquidatedTroveSelection) -> LiquidatedTroveModel {
        let (message, action) = if selection.has_surplus_collateral {
            (RECLAIM_MESSAGE, TroveAction::ReclaimCollateral)
        } else {
            (OPEN_MESSAGE, TroveAction::OpenTrove)
        };

        LiquidatedTroveModel {
            heading: HEADING,
            title: LIQUIDATED_TITLE,
            message,
            action,
        }
    }

    pub fn activate(&self, action: TroveAction, dispatcher: &dyn EventDispatcher) -> ActionOutcome {
        match action {
            TroveAction::OpenTrove => {
                let event = TroveViewEvent::OpenTrovePressed;
                dispatcher.dispatch_event(event);
                ActionOutcome::Dispatched(event)
            }
            TroveAction::ReclaimCollateral => ActionOutcome::DelegatedToSurplusAction,
        }
    }
}
