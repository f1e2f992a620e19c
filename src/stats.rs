//! Statistical summaries.
//!
//! Degenerate inputs never error: an empty sequence averages to 0.0 and an
//! undefined correlation (too few points, mismatched lengths, zero
//! variance) is reported as 0.0, "no correlation".

use crate::record::Record;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Arithmetic mean, or 0.0 for an empty sequence
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson correlation coefficient r ∈ [-1, 1]
///
/// r = Σ(x - x̄)(y - ȳ) / √(Σ(x - x̄)² · Σ(y - ȳ)²)
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.len() < 2 {
        return 0.0;
    }

    let x_mean = average(xs);
    let y_mean = average(ys);

    let mut numerator = 0.0;
    let mut x_var = 0.0;
    let mut y_var = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        numerator += dx * dy;
        x_var += dx * dx;
        y_var += dy * dy;
    }

    let denominator = (x_var * y_var).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    // Float error can push |r| a hair past 1
    (numerator / denominator).clamp(-1.0, 1.0)
}

fn column(window: &[&Record], field: impl Fn(&Record) -> f64) -> Vec<f64> {
    window.iter().map(|r| field(r)).collect()
}

/// Averages and correlations over a trailing calendar window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub entries: usize,
    pub avg_mood: f64,
    pub avg_focus: f64,
    pub avg_des: f64,
    pub sleep_focus_r: f64,
    pub coffee_focus_r: f64,
    pub cig_focus_r: f64,
}

impl WeeklySummary {
    /// Summarize records dated within the `window_days` days ending at `today`.
    ///
    /// Unlike sleep debt this window is date based, not positional. Returns
    /// `None` when no record falls in the window.
    pub fn compute(history: &[Record], today: NaiveDate, window_days: u32) -> Option<Self> {
        if window_days == 0 {
            return None;
        }
        // Windows reaching past the calendar start cover all history
        let earliest = today
            .checked_sub_signed(Duration::days(i64::from(window_days) - 1))
            .unwrap_or(NaiveDate::MIN);
        let window: Vec<&Record> = history
            .iter()
            .filter(|r| r.date >= earliest && r.date <= today)
            .collect();

        if window.is_empty() {
            return None;
        }

        let moods = column(&window, |r| r.mood);
        let focuses = column(&window, |r| r.focus);
        let des = column(&window, |r| r.des);
        let sleeps = column(&window, |r| r.sleep);
        let coffees = column(&window, |r| f64::from(r.coffee));
        let cigs = column(&window, |r| f64::from(r.cig));

        Some(Self {
            entries: window.len(),
            avg_mood: average(&moods),
            avg_focus: average(&focuses),
            avg_des: average(&des),
            sleep_focus_r: pearson_correlation(&sleeps, &focuses),
            coffee_focus_r: pearson_correlation(&coffees, &focuses),
            cig_focus_r: pearson_correlation(&cigs, &focuses),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record_on;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[4.0, 6.0]), 5.0);
    }

    #[test]
    fn test_pearson_perfect() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        assert!(approx_eq(pearson_correlation(&xs, &ys), 1.0, 1e-12));

        let inv = [8.0, 6.0, 4.0, 2.0];
        assert!(approx_eq(pearson_correlation(&xs, &inv), -1.0, 1e-12));
    }

    #[test]
    fn test_pearson_degenerate() {
        assert_eq!(pearson_correlation(&[1.0], &[2.0]), 0.0);
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(pearson_correlation(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(pearson_correlation(&[], &[]), 0.0);
    }

    #[test]
    fn test_pearson_symmetric() {
        let xs = [6.5, 7.0, 4.0, 8.0, 5.5];
        let ys = [5.0, 7.5, 2.5, 10.0, 5.0];
        assert_eq!(pearson_correlation(&xs, &ys), pearson_correlation(&ys, &xs));
    }

    #[test]
    fn test_weekly_window_is_date_based() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let history = vec![
            record_on(today - Duration::days(7), 1, 0, 7.0, 2.5, 5.0),
            record_on(today - Duration::days(6), 2, 0, 6.0, 5.0, 5.0),
            record_on(today, 1, 0, 8.0, 7.5, 7.5),
        ];

        let summary = WeeklySummary::compute(&history, today, 7).unwrap();
        assert_eq!(summary.entries, 2);
        assert_eq!(summary.avg_focus, 6.25);
        assert_eq!(summary.avg_mood, 6.25);
        // Two points moving together
        assert!(approx_eq(summary.sleep_focus_r, 1.0, 1e-12));
        assert!(approx_eq(summary.coffee_focus_r, -1.0, 1e-12));
        // Constant cigarette count
        assert_eq!(summary.cig_focus_r, 0.0);
    }

    #[test]
    fn test_weekly_huge_window_covers_everything() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let history = vec![
            record_on(today - Duration::days(3650), 1, 0, 7.0, 5.0, 5.0),
            record_on(today, 2, 0, 8.0, 7.5, 7.5),
        ];
        let summary = WeeklySummary::compute(&history, today, u32::MAX).unwrap();
        assert_eq!(summary.entries, 2);
    }

    #[test]
    fn test_weekly_empty_window() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let history = vec![record_on(today - Duration::days(30), 1, 0, 7.0, 5.0, 5.0)];
        assert!(WeeklySummary::compute(&history, today, 7).is_none());
        assert!(WeeklySummary::compute(&[], today, 7).is_none());
    }
}
