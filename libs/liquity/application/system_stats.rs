//! System statistics view
//!
//! Turns the protocol selection into the rows of the statistics panel. Every
//! function here is total: a zero debt omits the ratio rows instead of
//! dividing by zero.

use crate::domain::{
    BuildProfile, CommitRef, ConnectionInfo, Decimal, Emphasis, Percent, Statistic,
    StatisticKind,
};

use super::selectors::{BalancesSelection, SystemStatsSelection};

const BORROWING_FEE_TOOLTIP: &str = "The Borrowing Fee is a one-off fee charged as a percentage \
    of the borrowed amount (in LUSD) and is part of a Trove's debt. The fee varies between 0.5% \
    and 5% depending on LUSD redemption volumes.";
const TVL_TOOLTIP: &str = "The Total Value Locked (TVL) is the total value of Ether locked as \
    collateral in the system, given in ETH and USD.";
const TROVES_TOOLTIP: &str = "The total number of active Troves in the system.";
const LUSD_SUPPLY_TOOLTIP: &str = "The total LUSD minted by the Liquity Protocol.";
const STABILITY_POOL_TOOLTIP: &str = "The total LUSD currently held in the Stability Pool, \
    expressed as an amount and a fraction of the LUSD supply.";
const STAKED_LQTY_TOOLTIP: &str =
    "The total amount of LQTY that is staked for earning fee revenue.";
const TCR_TOOLTIP: &str = "The ratio of the Dollar value of the entire system collateral at the \
    current ETH:USD price, to the entire system debt.";
const RECOVERY_MODE_TOOLTIP: &str = "Recovery Mode is activated when the Total Collateral Ratio \
    (TCR) falls below 150%. When active, your Trove can be liquidated if its collateral ratio is \
    below the TCR. The maximum collateral you can lose from liquidation is capped at 110% of your \
    Trove's debt. Operations are also restricted that would negatively impact the TCR.";
const KICKBACK_RATE_TOOLTIP: &str = "A rate between 0 and 100% set by the Frontend Operator that \
    determines the fraction of LQTY that will be paid out as a kickback to the Stability \
    Providers using the frontend.";

/// Presentation options fixed when the view is composed
#[derive(Debug, Clone)]
pub struct SystemStatsOptions {
    pub show_balances: bool,
    /// Kickback rate and version rows
    pub frontend_section_enabled: bool,
    pub build: BuildProfile,
}

impl Default for SystemStatsOptions {
    fn default() -> Self {
        Self {
            show_balances: false,
            frontend_section_enabled: false,
            build: BuildProfile::Production { version: None },
        }
    }
}

/// Rows of the statistics panel, grouped the way they are displayed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemStatsModel {
    pub balances: Vec<Statistic>,
    pub protocol: Vec<Statistic>,
    pub frontend: Vec<Statistic>,
}

impl SystemStatsModel {
    pub fn all(&self) -> impl Iterator<Item = &Statistic> {
        self.balances.iter().chain(&self.protocol).chain(&self.frontend)
    }

    pub fn get(&self, kind: StatisticKind) -> Option<&Statistic> {
        self.all().find(|s| s.kind == kind)
    }
}

pub struct SystemStatsView {
    connection: ConnectionInfo,
    options: SystemStatsOptions,
}

impl SystemStatsView {
    pub fn new(connection: ConnectionInfo, options: SystemStatsOptions) -> Self {
        Self { connection, options }
    }

    pub fn options(&self) -> &SystemStatsOptions {
        &self.options
    }

    pub fn set_show_balances(&mut self, show: bool) {
        self.options.show_balances = show;
    }

    /// Compute every row for one render pass
    pub fn render(
        &self,
        selection: &SystemStatsSelection,
        balances: Option<&BalancesSelection>,
    ) -> SystemStatsModel {
        let balances = match balances {
            Some(b) if self.options.show_balances => balance_statistics(b),
            _ => Vec::new(),
        };
        let frontend = if self.options.frontend_section_enabled {
            self.frontend_statistics(selection)
        } else {
            Vec::new()
        };

        SystemStatsModel {
            balances,
            protocol: protocol_statistics(selection),
            frontend,
        }
    }

    /// Every row of one render pass in display order
    pub fn statistics(
        &self,
        selection: &SystemStatsSelection,
        balances: Option<&BalancesSelection>,
    ) -> Vec<Statistic> {
        self.render(selection, balances).all().cloned().collect()
    }

    fn frontend_statistics(&self, selection: &SystemStatsSelection) -> Vec<Statistic> {
        let mut stats = Vec::new();

        if let Some(rate) = kickback_rate_display(&self.connection, selection.kickback_rate) {
            stats.push(
                Statistic::new(StatisticKind::KickbackRate, "Kickback Rate", format!("{}%", rate))
                    .with_tooltip(KICKBACK_RATE_TOOLTIP),
            );
        }

        let contracts = CommitRef::parse(Some(&self.connection.version));
        stats.push(Statistic::new(
            StatisticKind::ContractsVersion,
            "Contracts version",
            contracts.label(),
        ));
        stats.push(Statistic::new(
            StatisticKind::Deployed,
            "Deployed",
            self.connection
                .deployment_date
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
        ));

        let frontend_version = match &self.options.build {
            BuildProfile::Development => "development".to_string(),
            BuildProfile::Production { version } => {
                CommitRef::parse(version.as_deref()).label().to_string()
            }
        };
        stats.push(Statistic::new(
            StatisticKind::FrontendVersion,
            "Frontend version",
            frontend_version,
        ));

        stats
    }
}

/// Account balances panel
pub fn balance_statistics(balances: &BalancesSelection) -> Vec<Statistic> {
    vec![
        Statistic::new(StatisticKind::EthBalance, "ETH", balances.account_balance.prettify(4)),
        Statistic::new(StatisticKind::LusdBalance, "LUSD", balances.lusd_balance.prettify(2)),
        Statistic::new(StatisticKind::LqtyBalance, "LQTY", balances.lqty_balance.prettify(2)),
    ]
}

/// Protocol panel
pub fn protocol_statistics(selection: &SystemStatsSelection) -> Vec<Statistic> {
    let total = &selection.total;
    let mut stats = Vec::with_capacity(8);

    stats.push(
        Statistic::new(
            StatisticKind::BorrowingFee,
            "Borrowing Fee",
            Percent::new(selection.borrowing_rate).to_string_with_precision(2),
        )
        .with_tooltip(BORROWING_FEE_TOOLTIP),
    );

    stats.push(
        Statistic::new(
            StatisticKind::TotalValueLocked,
            "TVL",
            format!("{} ETH", total.collateral.shorten()),
        )
        .with_detail(format!("(${})", total.collateral.mul(selection.price).shorten()))
        .with_tooltip(TVL_TOOLTIP),
    );

    stats.push(
        Statistic::new(
            StatisticKind::Troves,
            "Troves",
            Decimal::from(selection.number_of_troves).prettify(0),
        )
        .with_tooltip(TROVES_TOOLTIP),
    );

    stats.push(
        Statistic::new(StatisticKind::LusdSupply, "LUSD supply", total.debt.shorten())
            .with_tooltip(LUSD_SUPPLY_TOOLTIP),
    );

    if let Some(fraction) = stability_pool_fraction(selection) {
        stats.push(
            Statistic::new(
                StatisticKind::LusdInStabilityPool,
                "LUSD in Stability Pool",
                selection.lusd_in_stability_pool.shorten(),
            )
            .with_detail(format!("({})", fraction.to_string_with_precision(1)))
            .with_tooltip(STABILITY_POOL_TOOLTIP),
        );
    }

    stats.push(
        Statistic::new(
            StatisticKind::StakedLqty,
            "Staked LQTY",
            selection.total_staked_lqty.shorten(),
        )
        .with_tooltip(STAKED_LQTY_TOOLTIP),
    );

    if let Some(ratio) = total.collateral_ratio(selection.price) {
        stats.push(
            Statistic::new(
                StatisticKind::TotalCollateralRatio,
                "Total Collateral Ratio",
                Percent::new(ratio).prettify(),
            )
            .with_tooltip(TCR_TOOLTIP),
        );
    }

    let recovery_mode = total.collateral_ratio_is_below_critical(selection.price);
    let recovery = if recovery_mode {
        Statistic::new(StatisticKind::RecoveryMode, "Recovery Mode", "Yes")
            .with_emphasis(Emphasis::Danger)
    } else {
        Statistic::new(StatisticKind::RecoveryMode, "Recovery Mode", "No")
    };
    stats.push(recovery.with_tooltip(RECOVERY_MODE_TOOLTIP));

    stats
}

/// Share of the LUSD supply held by the Stability Pool; `None` without debt
pub fn stability_pool_fraction(selection: &SystemStatsSelection) -> Option<Percent> {
    let debt = selection.total.debt.non_zero()?;
    selection
        .lusd_in_stability_pool
        .checked_div(debt)
        .map(Percent::new)
}

/// Kickback rate as a whole-number percentage, without the `%` sign.
///
/// An untagged frontend always shows "100".
pub fn kickback_rate_display(
    connection: &ConnectionInfo,
    kickback_rate: Option<Decimal>,
) -> Option<String> {
    if connection.is_untagged() {
        return Some("100".to_string());
    }
    kickback_rate.map(|rate| rate.mul(Decimal::from(100)).prettify(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ethers::types::Address;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn connection(tag: Address) -> ConnectionInfo {
        ConnectionInfo {
            version: "0123456789abcdef0123456789abcdef01234567".to_string(),
            deployment_date: Utc.with_ymd_and_hms(2021, 4, 5, 12, 0, 0).unwrap(),
            frontend_tag: tag,
        }
    }

    fn selection(collateral: &str, debt: &str, price: &str) -> SystemStatsSelection {
        SystemStatsSelection {
            number_of_troves: 1234,
            price: dec(price),
            total: crate::domain::Trove::new(dec(collateral), dec(debt)),
            lusd_in_stability_pool: dec("250000"),
            borrowing_rate: dec("0.005"),
            redemption_rate: dec("0.01"),
            total_staked_lqty: dec("3456789"),
            kickback_rate: None,
        }
    }

    fn value(model: &SystemStatsModel, kind: StatisticKind) -> Option<&str> {
        model.get(kind).map(|s| s.value.as_str())
    }

    #[test]
    fn test_healthy_system() {
        let view = SystemStatsView::new(connection(Address::zero()), SystemStatsOptions::default());
        let model = view.render(&selection("1000000", "500000", "2000"), None);

        assert_eq!(value(&model, StatisticKind::BorrowingFee), Some("0.50%"));
        assert_eq!(value(&model, StatisticKind::TotalValueLocked), Some("1.00M ETH"));
        assert_eq!(
            model.get(StatisticKind::TotalValueLocked).unwrap().detail.as_deref(),
            Some("($2.00B)")
        );
        assert_eq!(value(&model, StatisticKind::Troves), Some("1,234"));
        assert_eq!(value(&model, StatisticKind::LusdSupply), Some("500K"));
        assert_eq!(value(&model, StatisticKind::LusdInStabilityPool), Some("250K"));
        assert_eq!(
            model.get(StatisticKind::LusdInStabilityPool).unwrap().detail.as_deref(),
            Some("(50.0%)")
        );
        assert_eq!(value(&model, StatisticKind::StakedLqty), Some("3.46M"));
        assert_eq!(value(&model, StatisticKind::TotalCollateralRatio), Some("400000%"));
        assert_eq!(value(&model, StatisticKind::RecoveryMode), Some("No"));
        assert_eq!(
            model.get(StatisticKind::RecoveryMode).unwrap().emphasis,
            Emphasis::Normal
        );
    }

    #[test]
    fn test_recovery_mode() {
        let view = SystemStatsView::new(connection(Address::zero()), SystemStatsOptions::default());
        let model = view.render(&selection("100", "100000", "1000"), None);

        assert_eq!(value(&model, StatisticKind::TotalCollateralRatio), Some("100.0%"));
        let recovery = model.get(StatisticKind::RecoveryMode).unwrap();
        assert_eq!(recovery.value, "Yes");
        assert_eq!(recovery.emphasis, Emphasis::Danger);
    }

    #[test]
    fn test_zero_debt_omits_ratio_rows() {
        let view = SystemStatsView::new(connection(Address::zero()), SystemStatsOptions::default());
        let model = view.render(&selection("10", "0", "2000"), None);

        assert!(model.get(StatisticKind::LusdInStabilityPool).is_none());
        assert!(model.get(StatisticKind::TotalCollateralRatio).is_none());
        assert_eq!(value(&model, StatisticKind::RecoveryMode), Some("No"));
        assert_eq!(value(&model, StatisticKind::LusdSupply), Some("0.00"));
    }

    #[test]
    fn test_balances_only_when_enabled() {
        let balances = BalancesSelection {
            account_balance: dec("1.23456"),
            lusd_balance: dec("12345.678"),
            lqty_balance: dec("0"),
        };
        let sel = selection("1000", "500", "2000");

        let hidden = SystemStatsView::new(connection(Address::zero()), SystemStatsOptions::default());
        assert!(hidden.render(&sel, Some(&balances)).balances.is_empty());

        let options = SystemStatsOptions { show_balances: true, ..Default::default() };
        let shown = SystemStatsView::new(connection(Address::zero()), options);
        let model = shown.render(&sel, Some(&balances));
        assert_eq!(value(&model, StatisticKind::EthBalance), Some("1.2346"));
        assert_eq!(value(&model, StatisticKind::LusdBalance), Some("12,345.68"));
        assert_eq!(value(&model, StatisticKind::LqtyBalance), Some("0.00"));
    }

    #[test]
    fn test_kickback_rate_display() {
        let untagged = connection(Address::zero());
        assert_eq!(kickback_rate_display(&untagged, None).as_deref(), Some("100"));
        assert_eq!(kickback_rate_display(&untagged, Some(dec("0.25"))).as_deref(), Some("100"));

        let tagged = connection(Address::repeat_byte(0x11));
        assert_eq!(kickback_rate_display(&tagged, Some(dec("0.25"))).as_deref(), Some("25"));
        assert_eq!(kickback_rate_display(&tagged, None), None);
    }

    #[test]
    fn test_frontend_section_behind_flag() {
        let sel = selection("1000", "500", "2000");
        let view = SystemStatsView::new(connection(Address::zero()), SystemStatsOptions::default());
        assert!(view.render(&sel, None).frontend.is_empty());

        let options = SystemStatsOptions {
            frontend_section_enabled: true,
            build: BuildProfile::Development,
            ..Default::default()
        };
        let view = SystemStatsView::new(connection(Address::zero()), options);
        let model = view.render(&sel, None);

        assert_eq!(value(&model, StatisticKind::KickbackRate), Some("100%"));
        assert_eq!(value(&model, StatisticKind::ContractsVersion), Some("0123456"));
        assert_eq!(value(&model, StatisticKind::Deployed), Some("2021-04-05 12:00:00 UTC"));
        assert_eq!(value(&model, StatisticKind::FrontendVersion), Some("development"));
    }

    #[test]
    fn test_statistics_in_display_order() {
        let view = SystemStatsView::new(connection(Address::zero()), SystemStatsOptions::default());
        let kinds: Vec<_> = view
            .statistics(&selection("1000", "500", "2000"), None)
            .into_iter()
            .map(|s| s.kind)
            .collect();
        assert_eq!(kinds.first(), Some(&StatisticKind::BorrowingFee));
        assert_eq!(kinds.last(), Some(&StatisticKind::RecoveryMode));
        assert_eq!(kinds.len(), 8);
    }

    #[test]
    fn test_production_frontend_version() {
        let options = SystemStatsOptions {
            frontend_section_enabled: true,
            build: BuildProfile::Production { version: Some("not-a-hash".to_string()) },
            ..Default::default()
        };
        let view = SystemStatsView::new(connection(Address::repeat_byte(0x22)), options);
        let model = view.render(&selection("1000", "500", "2000"), None);

        // registered tag without a kickback rate: row omitted
        assert!(model.get(StatisticKind::KickbackRate).is_none());
        assert_eq!(value(&model, StatisticKind::FrontendVersion), Some("unknown"));
    }
}
