//! Domain Layer
//!
//! Fixed-point amounts, snapshot records and display statistics.
//! No I/O and no dependency on the other layers.

pub mod connection;
pub mod decimal;
pub mod state;
pub mod statistic;

pub use connection::{BuildProfile, CommitRef, ConnectionInfo};
pub use decimal::{Decimal, DecimalError, Percent, DECIMALS};
pub use state::{
    critical_collateral_ratio, AccountSnapshot, FrontendStatus, LiquityStoreState,
    ProtocolSnapshot, SnapshotError, Trove, TroveStatus,
};
pub use statistic::{Emphasis, Statistic, StatisticKind};
