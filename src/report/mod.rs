use std::fmt::Write;

use crate::core::{ProjectionSummary, YearResult};

const BAR_WIDTH: f64 = 40.0;

/// Whole-pound currency with thousands separators, e.g. `£1,500,000`.
pub fn format_currency(value: f64) -> String {
    let pounds = value.abs().round() as i64;

    let digits = pounds.to_string();
    let mut reversed = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            reversed.push(',');
        }
        reversed.push(c);
    }
    let grouped: String = reversed.chars().rev().collect();

    if value < 0.0 {
        format!("-£{grouped}")
    } else {
        format!("£{grouped}")
    }
}

pub fn format_percentage(pct: f64) -> String {
    format!("{pct:.1}%")
}

pub fn render_table(results: &[YearResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:>18}  {:>15}",
        "Year", "Portfolio Value", "Contributions"
    );
    for result in results {
        let _ = writeln!(
            out,
            "{:>4}  {:>18}  {:>15}",
            result.year,
            format_currency(result.portfolio_value),
            format_currency(result.total_contribution)
        );
    }
    out
}

/// Bar series of annual contributions, scaled to the largest year.
pub fn render_contribution_bars(results: &[YearResult]) -> String {
    let max = results
        .iter()
        .map(|r| r.total_contribution)
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    for result in results {
        let width = if max > 0.0 {
            (result.total_contribution / max * BAR_WIDTH).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{:>4} {:<40} {}",
            result.year,
            "#".repeat(width),
            format_currency(result.total_contribution)
        );
    }
    out
}

pub fn render_summary(summary: &ProjectionSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Final Portfolio Value  {}",
        format_currency(summary.final_portfolio_value)
    );
    let _ = writeln!(
        out,
        "Target Net Worth       {}",
        format_currency(summary.target_net_worth)
    );
    let _ = writeln!(
        out,
        "Progress               {}",
        format_percentage(summary.progress_pct)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year_result(year: u32, portfolio_value: f64, total_contribution: f64) -> YearResult {
        YearResult {
            year,
            portfolio_value,
            total_contribution,
        }
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "£0");
        assert_eq!(format_currency(999.0), "£999");
        assert_eq!(format_currency(1_500_000.0), "£1,500,000");
        assert_eq!(format_currency(12_345.0), "£12,345");
    }

    #[test]
    fn currency_rounds_to_whole_pounds() {
        assert_eq!(format_currency(999.6), "£1,000");
        assert_eq!(format_currency(1204.49), "£1,204");
    }

    #[test]
    fn currency_keeps_the_sign_outside_the_symbol() {
        assert_eq!(format_currency(-250.0), "-£250");
    }

    #[test]
    fn percentage_shows_one_decimal() {
        assert_eq!(format_percentage(50.0), "50.0%");
        assert_eq!(format_percentage(7.24), "7.2%");
        assert_eq!(format_percentage(107.876), "107.9%");
    }

    #[test]
    fn table_lists_one_row_per_year() {
        let results = vec![
            year_result(1, 6200.0, 6000.0),
            year_result(2, 13_000.0, 6600.0),
        ];

        let table = render_table(&results);
        assert!(table.contains("Portfolio Value"));
        assert!(table.contains("£6,200"));
        assert!(table.contains("£6,600"));
        assert_eq!(table.lines().count(), 3);
    }

    #[test]
    fn bars_scale_to_the_largest_contribution() {
        let results = vec![
            year_result(1, 0.0, 1000.0),
            year_result(2, 0.0, 2000.0),
        ];

        let bars = render_contribution_bars(&results);
        let lines = bars.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(&"#".repeat(20)));
        assert!(lines[1].contains(&"#".repeat(40)));
    }

    #[test]
    fn zero_contributions_render_empty_bars() {
        let results = vec![year_result(1, 0.0, 0.0)];
        let bars = render_contribution_bars(&results);
        assert!(!bars.contains('#'));
    }

    #[test]
    fn summary_shows_the_three_headline_figures() {
        let summary = ProjectionSummary {
            final_portfolio_value: 750_000.0,
            target_net_worth: 1_500_000.0,
            progress_pct: 50.0,
        };

        let rendered = render_summary(&summary);
        assert!(rendered.contains("£750,000"));
        assert!(rendered.contains("£1,500,000"));
        assert!(rendered.contains("50.0%"));
    }
}
