//! Rule-based behavioral flags for a single record.

use crate::record::Record;
use serde::{Deserialize, Serialize};

/// Default DLS above which a day counts as overstimulated
pub const DEFAULT_OVERSTIM_THRESHOLD: f64 = 8.0;

/// DES at or above which a day counts as "locked in"
pub const LOCKED_IN_DES: f64 = 8.0;

/// Qualitative warning raised for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flag {
    /// Short sleep, heavy smoking and poor focus together
    BurnoutRisk,
    /// Dopamine load above the configured threshold
    Overstimulation,
    /// High cognitive efficiency
    LockedIn,
}

impl Flag {
    pub fn message(&self) -> &'static str {
        match self {
            Flag::BurnoutRisk => "Burnout risk detected: low sleep + high cigarettes + low focus.",
            Flag::Overstimulation => "Overstimulation warning: dopamine load is elevated.",
            Flag::LockedIn => "Locked-In mode: high cognitive efficiency today.",
        }
    }

    /// Whether this flag is a warning rather than good news
    pub fn is_warning(&self) -> bool {
        !matches!(self, Flag::LockedIn)
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Classify one record. Every rule is checked; output follows rule order.
pub fn detect_flags(record: &Record, overstim_threshold: f64) -> Vec<Flag> {
    let mut flags = Vec::new();

    if record.sleep < 5.0 && record.cig > 4 && record.focus < 5.0 {
        flags.push(Flag::BurnoutRisk);
    }
    if record.dls > overstim_threshold {
        flags.push(Flag::Overstimulation);
    }
    if record.des >= LOCKED_IN_DES {
        flags.push(Flag::LockedIn);
    }

    flags
}
