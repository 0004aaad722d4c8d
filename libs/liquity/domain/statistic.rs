//! Display-ready statistics

/// Which statistic a row shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatisticKind {
    EthBalance,
    LusdBalance,
    LqtyBalance,
    BorrowingFee,
    TotalValueLocked,
    Troves,
    LusdSupply,
    LusdInStabilityPool,
    StakedLqty,
    TotalCollateralRatio,
    RecoveryMode,
    KickbackRate,
    ContractsVersion,
    Deployed,
    FrontendVersion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    Danger,
}

/// One labelled, formatted value produced during a render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistic {
    pub kind: StatisticKind,
    pub name: &'static str,
    pub value: String,
    /// Secondary text shown next to the value
    pub detail: Option<String>,
    pub tooltip: Option<&'static str>,
    pub emphasis: Emphasis,
}

impl Statistic {
    pub fn new(kind: StatisticKind, name: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            name,
            value: value.into(),
            detail: None,
            tooltip: None,
            emphasis: Emphasis::Normal,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: &'static str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    pub fn with_emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }

    /// Value and detail on one line
    pub fn display_value(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{} {}", self.value, detail),
            None => self.value.clone(),
        }
    }
}

/// Look up a statistic by kind
pub fn find(stats: &[Statistic], kind: StatisticKind) -> Option<&Statistic> {
    stats.iter().find(|s| s.kind == kind)
}
