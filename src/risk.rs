//! Sleep debt, next-day crash risk and day status bands.

use crate::record::Record;
use crate::scores::round2;
use serde::{Deserialize, Serialize};

/// Default nightly sleep target in hours
pub const DEFAULT_IDEAL_SLEEP: f64 = 7.0;

/// Number of trailing records that count towards sleep debt
pub const SLEEP_DEBT_WINDOW: usize = 7;

/// Cumulative sleep shortfall over the last `window` records.
///
/// The window is a suffix of `history` in the order given, not a date range.
/// Oversleeping never pays debt back.
pub fn sleep_debt_over(history: &[Record], ideal_sleep: f64, window: usize) -> f64 {
    let start = history.len().saturating_sub(window);
    let debt = history[start..]
        .iter()
        .map(|r| (ideal_sleep - r.sleep).max(0.0))
        .fold(0.0, |acc, short| acc + short);
    round2(debt)
}

/// Sleep debt over the last 7 records
pub fn detect_sleep_debt(history: &[Record], ideal_sleep: f64) -> f64 {
    sleep_debt_over(history, ideal_sleep, SLEEP_DEBT_WINDOW)
}

/// Next-day crash risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CrashRisk {
    Low,
    Moderate,
    High,
}

impl CrashRisk {
    pub fn from_score(score: u32) -> Self {
        if score >= 4 {
            CrashRisk::High
        } else if score >= 2 {
            CrashRisk::Moderate
        } else {
            CrashRisk::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CrashRisk::Low => "LOW",
            CrashRisk::Moderate => "MODERATE",
            CrashRisk::High => "HIGH",
        }
    }
}

impl std::fmt::Display for CrashRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Risk points: short sleep and heavy load weigh 2, nicotine and caffeine 1
pub fn crash_risk_score(record: &Record) -> u32 {
    let mut score = 0;
    if record.sleep < 5.0 {
        score += 2;
    }
    if record.dls >= 8.0 {
        score += 2;
    }
    if record.cig >= 4 {
        score += 1;
    }
    if record.coffee >= 4 {
        score += 1;
    }
    score
}

/// Predict next-day crash risk from a single record
pub fn predict_crash_risk(record: &Record) -> CrashRisk {
    CrashRisk::from_score(crash_risk_score(record))
}

/// How efficient the day was, from DES
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EfficiencyStatus {
    LockedIn,
    Stable,
    Low,
}

impl EfficiencyStatus {
    pub fn from_des(des: f64) -> Self {
        if des >= 8.0 {
            EfficiencyStatus::LockedIn
        } else if des >= 5.0 {
            EfficiencyStatus::Stable
        } else {
            EfficiencyStatus::Low
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            EfficiencyStatus::LockedIn => "LOCKED IN - High cognitive efficiency.",
            EfficiencyStatus::Stable => "Stable - Room for optimization.",
            EfficiencyStatus::Low => {
                "Low Efficiency - Improve sleep or reduce overstimulation."
            }
        }
    }
}

/// Stimulation band, from DLS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StimulationLevel {
    Controlled,
    Moderate,
    High,
}

impl StimulationLevel {
    pub fn from_dls(dls: f64) -> Self {
        if dls >= 8.0 {
            StimulationLevel::High
        } else if dls >= 4.0 {
            StimulationLevel::Moderate
        } else {
            StimulationLevel::Controlled
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            StimulationLevel::High => "High - Risk of overstimulation.",
            StimulationLevel::Moderate => "Moderate.",
            StimulationLevel::Controlled => "Controlled.",
        }
    }
}
