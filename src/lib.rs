//! # DOP Engine
//!
//! Offline dopamine optimization: scores a day of stimulant intake, sleep and
//! behavioral ratings, and mines the history of such days for patterns.
//!
//! ## Scores
//!
//! ```text
//! DES = clamp(0.4·focus + 0.3·mood + 0.3·energy + 0.25·sleep − 0.2·coffee − 0.3·cig, 0, 10)
//! DLS = coffee + cig + gaming
//! ```
//!
//! ## Analytics
//!
//! - flags and next-day crash risk for a single day
//! - sleep debt over the last 7 entries
//! - averages and Pearson correlations
//! - optimal coffee / sleep / cigarette zones for focus
//! - weighted nearest-neighbor prediction of focus and mood
//!
//! All analytics are pure functions over `&[Record]`. Persistence lives in
//! [`storage`], terminal output in [`report`] and [`prompt`].
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `wasm`: WebAssembly bindings via wasm-bindgen
//!
//! ## Example
//!
//! ```rust
//! use dop_engine::{predict_from_history, Record, Scenario};
//!
//! let history: Vec<Record> = Vec::new();
//! let scenario = Scenario { coffee: 2, cig: 0, sleep: 7.5, gaming: 1.0 };
//!
//! // No history yet: neutral prediction
//! let prediction = predict_from_history(&history, &scenario);
//! assert_eq!(prediction.focus, 5.0);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod flags;
pub mod predict;
pub mod prompt;
pub mod record;
pub mod report;
pub mod risk;
pub mod scores;
pub mod stats;
pub mod storage;
pub mod zones;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports
pub use config::*;
pub use engine::*;
pub use error::*;
pub use flags::*;
pub use predict::*;
pub use record::*;
pub use risk::*;
pub use scores::*;
pub use stats::*;
pub use storage::JsonStore;
pub use zones::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the engine (call once, especially important for WASM)
#[cfg(feature = "wasm")]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::record::Record;
    use crate::scores::{calculate_des, calculate_dls};
    use chrono::NaiveDate;

    /// A day with energy 5 and no gaming or coding, scores derived
    pub fn record_on(
        date: NaiveDate,
        coffee: u32,
        cig: u32,
        sleep: f64,
        focus: f64,
        mood: f64,
    ) -> Record {
        let energy = 5.0;
        Record {
            date,
            coffee,
            cig,
            sleep,
            gaming: 0.0,
            coding: 0.0,
            mood,
            focus,
            energy,
            des: calculate_des(focus, mood, energy, sleep, coffee, cig),
            dls: calculate_dls(coffee, cig, 0.0),
        }
    }

    pub fn record(coffee: u32, cig: u32, sleep: f64, focus: f64, mood: f64) -> Record {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        record_on(date, coffee, cig, sleep, focus, mood)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_basic_workflow() {
        let ratings = BehavioralRatings {
            deep_work: Rating::HIGH,
            distraction: Rating::MID,
            stability: Rating::HIGH,
            satisfaction: Rating::HIGH,
            fatigue: Rating::MID,
            sharpness: Rating::HIGH,
        };
        let inputs = StimulusInputs {
            coffee: 2,
            cig: 0,
            sleep: 8.0,
            gaming: 1.0,
            coding: 5.0,
        };

        let history: Vec<Record> = (1..=10)
            .map(|day| {
                let date = NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
                Record::from_inputs(date, inputs, ratings).unwrap()
            })
            .collect();

        let model = DopModel::new();
        let today = history.last().unwrap();
        let report = model.entry_report(today, &history);

        assert!(report.des >= 0.0 && report.des <= 10.0);
        assert_eq!(report.sleep_debt, 0.0);
        assert_eq!(report.crash_risk, CrashRisk::Low);

        let zone = model.optimal_zone(&history);
        assert_eq!(zone.coffee, "2 cups/day");
        assert_eq!(zone.sleep, "8.0-9.9 hours");
        assert_eq!(zone.cig_threshold, "No clear threshold");

        let prediction = model.predict(
            &history,
            &Scenario {
                coffee: 2,
                cig: 0,
                sleep: 8.0,
                gaming: 1.0,
            },
        );
        assert_eq!(prediction.focus, today.focus);
        assert_eq!(prediction.mood, today.mood);
    }
}
