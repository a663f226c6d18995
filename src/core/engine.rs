use super::types::{
    MAX_HORIZON_YEARS, ProjectionError, ProjectionSummary, ScheduleEntry, SimulationConfig,
    YearResult,
};

/// Geometric monthly equivalent of an annual return rate, satisfying
/// `(1 + monthly)^12 == 1 + annual`.
pub fn monthly_rate(annual_return_rate: f64) -> f64 {
    (1.0 + annual_return_rate).powf(1.0 / 12.0) - 1.0
}

/// Projects the portfolio over the full horizon.
///
/// Each year applies twelve monthly steps of growth followed by that month's
/// contribution, then adds the year's lump sum, which therefore only starts
/// compounding the following year. The returned sequence has one entry per
/// schedule year, carrying the end-of-year value and that year's
/// contributions.
pub fn project(
    config: &SimulationConfig,
    schedule: &[ScheduleEntry],
) -> Result<Vec<YearResult>, ProjectionError> {
    validate(config, schedule)?;

    // Constant across years while the annual rate is constant.
    let monthly_rate = monthly_rate(config.annual_return_rate);

    let mut results = Vec::with_capacity(schedule.len());
    let mut portfolio_value = 0.0_f64;

    for entry in schedule {
        for _ in 0..12 {
            portfolio_value = portfolio_value * (1.0 + monthly_rate) + entry.monthly_contribution;
        }
        portfolio_value += entry.lump_sum;

        results.push(YearResult {
            year: entry.year,
            portfolio_value,
            total_contribution: entry.monthly_contribution * 12.0 + entry.lump_sum,
        });
    }

    Ok(results)
}

/// Headline figures for the presenter: the closing value, the target, and
/// how far along the plan is. Callers validate `target_net_worth > 0` before
/// running a projection.
pub fn summarize(config: &SimulationConfig, results: &[YearResult]) -> ProjectionSummary {
    let final_portfolio_value = results.last().map_or(0.0, |r| r.portfolio_value);
    ProjectionSummary {
        final_portfolio_value,
        target_net_worth: config.target_net_worth,
        progress_pct: final_portfolio_value / config.target_net_worth * 100.0,
    }
}

fn validate(config: &SimulationConfig, schedule: &[ScheduleEntry]) -> Result<(), ProjectionError> {
    if config.horizon_years < 1 {
        return Err(ProjectionError::InvalidConfiguration(
            "horizon must cover at least one year".to_string(),
        ));
    }

    if config.horizon_years > MAX_HORIZON_YEARS {
        return Err(ProjectionError::InvalidConfiguration(format!(
            "horizon must not exceed {MAX_HORIZON_YEARS} years"
        )));
    }

    if !config.annual_return_rate.is_finite() || config.annual_return_rate <= -1.0 {
        return Err(ProjectionError::InvalidConfiguration(
            "annual return rate must be a finite number greater than -1".to_string(),
        ));
    }

    if schedule.len() != config.horizon_years as usize {
        return Err(ProjectionError::InvalidConfiguration(format!(
            "schedule covers {} years but the horizon is {} years",
            schedule.len(),
            config.horizon_years
        )));
    }

    for (index, entry) in schedule.iter().enumerate() {
        if entry.year as usize != index + 1 {
            return Err(ProjectionError::InvalidConfiguration(format!(
                "schedule entry at index {index} is labelled year {}",
                entry.year
            )));
        }

        if !entry.monthly_contribution.is_finite() || entry.monthly_contribution < 0.0 {
            return Err(ProjectionError::InvalidConfiguration(format!(
                "year {} monthly contribution must be a non-negative finite amount",
                entry.year
            )));
        }

        if !entry.lump_sum.is_finite() || entry.lump_sum < 0.0 {
            return Err(ProjectionError::InvalidConfiguration(format!(
                "year {} lump sum must be a non-negative finite amount",
                entry.year
            )));
        }
    }

    Ok(())
}
