//! Protocol and account snapshots
//!
//! These records mirror what the store publishes after each block: the
//! protocol-wide totals and the connected account's balances. They are
//! immutable once published; every view reads them through a selector.

use ethers::types::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::decimal::{Decimal, DECIMALS};

/// Below this total collateral ratio the system is in Recovery Mode (150%)
pub fn critical_collateral_ratio() -> Decimal {
    Decimal::from_raw(U256::from(15) * U256::exp10(DECIMALS - 1))
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("{field} must be a fraction between 0 and 1, got {value}")]
    FractionOutOfRange { field: &'static str, value: Decimal },
}

/// Collateral and debt of a trove, or of the whole system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Trove {
    pub collateral: Decimal,
    pub debt: Decimal,
}

impl Trove {
    pub fn new(collateral: Decimal, debt: Decimal) -> Self {
        Self { collateral, debt }
    }

    /// Collateral value at `price` divided by debt; undefined without debt
    pub fn collateral_ratio(&self, price: Decimal) -> Option<Decimal> {
        self.collateral.mul_div(price, self.debt)
    }

    pub fn collateral_ratio_is_below_critical(&self, price: Decimal) -> bool {
        self.collateral_ratio(price)
            .map(|ratio| ratio < critical_collateral_ratio())
            .unwrap_or(false)
    }
}

/// Registration of the frontend this dashboard runs as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FrontendStatus {
    #[default]
    Unregistered,
    #[serde(rename_all = "camelCase")]
    Registered { kickback_rate: Decimal },
}

impl FrontendStatus {
    pub fn kickback_rate(&self) -> Option<Decimal> {
        match self {
            FrontendStatus::Registered { kickback_rate } => Some(*kickback_rate),
            FrontendStatus::Unregistered => None,
        }
    }
}

/// Lifecycle status of the connected account's trove
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TroveStatus {
    #[default]
    NonExistent,
    Open,
    ClosedByOwner,
    ClosedByLiquidation,
    ClosedByRedemption,
}

/// Protocol-wide state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolSnapshot {
    /// Block the snapshot was read at, when the source knows it
    #[serde(default)]
    pub block_tag: Option<u64>,
    /// ETH:USD price
    pub price: Decimal,
    pub number_of_troves: u64,
    pub total: Trove,
    pub lusd_in_stability_pool: Decimal,
    pub borrowing_rate: Decimal,
    pub redemption_rate: Decimal,
    #[serde(rename = "totalStakedLQTY")]
    pub total_staked_lqty: Decimal,
    #[serde(default)]
    pub frontend: FrontendStatus,
}

/// Balances scoped to the connected account
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    /// ETH balance
    pub account_balance: Decimal,
    pub lusd_balance: Decimal,
    pub lqty_balance: Decimal,
    /// Collateral left over after a liquidation or redemption; zero if none
    #[serde(default)]
    pub collateral_surplus_balance: Decimal,
    #[serde(default)]
    pub trove_status: TroveStatus,
}

/// Everything the store publishes in one update
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LiquityStoreState {
    pub protocol: ProtocolSnapshot,
    pub account: AccountSnapshot,
}

impl LiquityStoreState {
    /// Reject snapshots whose fractional fields fall outside [0, 1]
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let fractions = [
            ("borrowingRate", Some(self.protocol.borrowing_rate)),
            ("redemptionRate", Some(self.protocol.redemption_rate)),
            ("kickbackRate", self.protocol.frontend.kickback_rate()),
        ];

        for (field, value) in fractions {
            if let Some(value) = value {
                if value > Decimal::one() {
                    return Err(SnapshotError::FractionOutOfRange { field, value });
                }
            }
        }
        Ok(())
    }
}
