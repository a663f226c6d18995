use serde::Serialize;
use thiserror::Error;

/// Upper bound on the simulated horizon, guarding against pathological
/// request sizes from an untrusted caller.
pub const MAX_HORIZON_YEARS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// One year of the contribution plan. Entries are ordered; the entry at
/// index `i` must carry `year == i + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleEntry {
    pub year: u32,
    pub monthly_contribution: f64,
    pub lump_sum: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub horizon_years: u32,
    /// Fractional annual return, e.g. 0.07 for 7%.
    pub annual_return_rate: f64,
    pub target_net_worth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearResult {
    pub year: u32,
    /// Portfolio value at the end of the year, after the lump sum lands.
    pub portfolio_value: f64,
    /// Contributions made during this year only, not cumulative.
    pub total_contribution: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub final_portfolio_value: f64,
    pub target_net_worth: f64,
    pub progress_pct: f64,
}
