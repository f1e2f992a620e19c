//! DOP model - the analytics facade.
//!
//! Bundles an [`AnalyticsConfig`] with the per-record and history-wide
//! analytics so callers (CLI, WASM) run everything with one set of tunables.
//!
//! The model holds no history of its own. Every call reads the slice it is
//! given and returns a fresh value; callers keep the slice unchanged for
//! the duration of a call (single writer, read snapshot).

use crate::config::AnalyticsConfig;
use crate::error::{DopError, Result};
use crate::flags::{detect_flags, Flag};
use crate::predict::{predict_with, Prediction, Scenario};
use crate::record::Record;
use crate::risk::{
    crash_risk_score, sleep_debt_over, CrashRisk, EfficiencyStatus, StimulationLevel,
};
use crate::stats::WeeklySummary;
use crate::zones::{detect_optimal_zone, OptimalZone};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Full diagnostic for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryReport {
    pub date: NaiveDate,
    pub des: f64,
    pub dls: f64,
    pub efficiency: EfficiencyStatus,
    pub stimulation: StimulationLevel,
    /// Sleep debt over the trailing window of the history (hours)
    pub sleep_debt: f64,
    pub crash_risk: CrashRisk,
    pub crash_risk_score: u32,
    pub flags: Vec<Flag>,
}

impl EntryReport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| DopError::SerializationError(e.to_string()))
    }
}

/// Analytics engine configured once and applied to any history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DopModel {
    config: AnalyticsConfig,
}

impl DopModel {
    /// Create a model with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Get model configuration
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Diagnose `record` against the history it belongs to
    pub fn entry_report(&self, record: &Record, history: &[Record]) -> EntryReport {
        let score = crash_risk_score(record);
        let report = EntryReport {
            date: record.date,
            des: record.des,
            dls: record.dls,
            efficiency: EfficiencyStatus::from_des(record.des),
            stimulation: StimulationLevel::from_dls(record.dls),
            sleep_debt: self.sleep_debt(history),
            crash_risk: CrashRisk::from_score(score),
            crash_risk_score: score,
            flags: detect_flags(record, self.config.overstim_threshold),
        };
        debug!(
            date = %report.date,
            risk = %report.crash_risk,
            flags = report.flags.len(),
            "entry report"
        );
        report
    }

    /// Sleep debt over the configured trailing window
    pub fn sleep_debt(&self, history: &[Record]) -> f64 {
        sleep_debt_over(history, self.config.ideal_sleep, self.config.sleep_debt_window)
    }

    /// Averages and correlations over the configured calendar window
    pub fn weekly_summary(&self, history: &[Record], today: NaiveDate) -> Option<WeeklySummary> {
        let summary = WeeklySummary::compute(history, today, self.config.weekly_window_days);
        debug!(
            history = history.len(),
            entries = summary.as_ref().map_or(0, |s| s.entries),
            "weekly summary"
        );
        summary
    }

    /// Optimal zones over the whole history
    pub fn optimal_zone(&self, history: &[Record]) -> OptimalZone {
        debug!(history = history.len(), "optimal zone detection");
        detect_optimal_zone(history)
    }

    /// Weighted-neighbor prediction for a hypothetical day
    pub fn predict(&self, history: &[Record], scenario: &Scenario) -> Prediction {
        let prediction = predict_with(history, scenario, &self.config);
        debug!(
            history = history.len(),
            focus = prediction.focus,
            mood = prediction.mood,
            "prediction"
        );
        prediction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    #[test]
    fn test_entry_report() {
        let mut today = record(5, 5, 4.0, 2.5, 2.5);
        today.dls = 12.0;
        today.des = 1.5;
        let history = vec![record(1, 0, 7.0, 5.0, 5.0), today.clone()];

        let model = DopModel::new();
        let report = model.entry_report(&today, &history);

        assert_eq!(report.crash_risk, CrashRisk::High);
        assert_eq!(report.crash_risk_score, 6);
        assert_eq!(report.efficiency, EfficiencyStatus::Low);
        assert_eq!(report.stimulation, StimulationLevel::High);
        assert_eq!(report.sleep_debt, 3.0);
        assert_eq!(report.flags, vec![Flag::BurnoutRisk, Flag::Overstimulation]);
    }

    #[test]
    fn test_config_flows_through() {
        let config = AnalyticsConfig {
            ideal_sleep: 8.0,
            overstim_threshold: 20.0,
            ..Default::default()
        };
        let model = DopModel::with_config(config);

        let mut r = record(5, 5, 7.0, 5.0, 5.0);
        r.dls = 12.0;
        let report = model.entry_report(&r, std::slice::from_ref(&r));

        assert_eq!(report.sleep_debt, 1.0);
        assert!(report.flags.is_empty());
    }

    #[test]
    fn test_report_serialization() {
        let r = record(1, 0, 8.0, 7.5, 7.5);
        let json = DopModel::new()
            .entry_report(&r, std::slice::from_ref(&r))
            .to_json()
            .unwrap();
        assert!(json.contains("\"crash_risk\":\"Low\""));
    }

    #[test]
    fn test_report_without_history_has_positive_zero_debt() {
        let r = record(1, 0, 8.0, 7.5, 7.5);
        let json = DopModel::new().entry_report(&r, &[]).to_json().unwrap();
        assert!(json.contains("\"sleep_debt\":0.0"));
        assert!(!json.contains("-0.0"));
    }

    #[test]
    fn test_wide_weekly_window_from_config() {
        let config = AnalyticsConfig::from_json(r#"{"weekly_window_days": 4000000000}"#).unwrap();
        let model = DopModel::with_config(config);
        let r = record(1, 0, 8.0, 7.5, 7.5);

        let summary = model.weekly_summary(std::slice::from_ref(&r), r.date).unwrap();
        assert_eq!(summary.entries, 1);
    }

    #[test]
    fn test_empty_history_sentinels() {
        let model = DopModel::new();
        assert_eq!(model.optimal_zone(&[]), OptimalZone::no_data());
        assert_eq!(
            model.predict(
                &[],
                &Scenario {
                    coffee: 0,
                    cig: 0,
                    sleep: 7.0,
                    gaming: 0.0
                }
            ),
            Prediction::neutral()
        );
        assert_eq!(model.sleep_debt(&[]), 0.0);
    }
}
