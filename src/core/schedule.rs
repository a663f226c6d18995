use super::types::ScheduleEntry;

/// Default monthly contribution for a year under the linear ramp.
pub fn default_monthly(starting_monthly: f64, monthly_increment: f64, year: u32) -> f64 {
    starting_monthly + (year - 1) as f64 * monthly_increment
}

/// Builds the per-year plan: monthly contributions rise linearly from
/// `starting_monthly`, lump sums default to zero, and sparse `(year, amount)`
/// overrides replace individual entries. Overrides naming a year outside the
/// horizon are ignored; adapters reject them before calling in.
pub fn build_schedule(
    horizon_years: u32,
    starting_monthly: f64,
    monthly_increment: f64,
    monthly_overrides: &[(u32, f64)],
    lump_sum_overrides: &[(u32, f64)],
) -> Vec<ScheduleEntry> {
    let mut schedule = (1..=horizon_years)
        .map(|year| ScheduleEntry {
            year,
            monthly_contribution: default_monthly(starting_monthly, monthly_increment, year),
            lump_sum: 0.0,
        })
        .collect::<Vec<_>>();

    for &(year, amount) in monthly_overrides {
        if let Some(entry) = year
            .checked_sub(1)
            .and_then(|index| schedule.get_mut(index as usize))
        {
            entry.monthly_contribution = amount;
        }
    }

    for &(year, amount) in lump_sum_overrides {
        if let Some(entry) = year
            .checked_sub(1)
            .and_then(|index| schedule.get_mut(index as usize))
        {
            entry.lump_sum = amount;
        }
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramps_monthly_contributions_linearly() {
        let schedule = build_schedule(3, 500.0, 50.0, &[], &[]);

        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule[0].year, 1);
        assert_eq!(schedule[0].monthly_contribution, 500.0);
        assert_eq!(schedule[1].monthly_contribution, 550.0);
        assert_eq!(schedule[2].monthly_contribution, 600.0);
        assert!(schedule.iter().all(|entry| entry.lump_sum == 0.0));
    }

    #[test]
    fn zero_increment_keeps_contributions_flat() {
        let schedule = build_schedule(4, 750.0, 0.0, &[], &[]);
        assert!(
            schedule
                .iter()
                .all(|entry| entry.monthly_contribution == 750.0)
        );
    }

    #[test]
    fn overrides_replace_single_years() {
        let schedule = build_schedule(3, 500.0, 50.0, &[(2, 900.0)], &[(3, 10_000.0)]);

        assert_eq!(schedule[0].monthly_contribution, 500.0);
        assert_eq!(schedule[1].monthly_contribution, 900.0);
        assert_eq!(schedule[2].monthly_contribution, 600.0);
        assert_eq!(schedule[2].lump_sum, 10_000.0);
        assert_eq!(schedule[0].lump_sum, 0.0);
    }

    #[test]
    fn out_of_range_overrides_are_ignored() {
        let schedule = build_schedule(2, 500.0, 50.0, &[(0, 1.0), (7, 2.0)], &[(99, 3.0)]);

        assert_eq!(schedule[0].monthly_contribution, 500.0);
        assert_eq!(schedule[1].monthly_contribution, 550.0);
        assert!(schedule.iter().all(|entry| entry.lump_sum == 0.0));
    }
}
