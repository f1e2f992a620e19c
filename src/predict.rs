//! Weighted-neighbor prediction.
//!
//! Scores every historical day by its similarity to a hypothetical set of
//! inputs and averages the outcomes of the closest days:
//!
//! ```text
//! d(r, s) = Σ w_i · |r_i − s_i|      over (coffee, cig, sleep, gaming)
//! weight  = 1 / (1 + d)              ∈ (0, 1]
//! focus   = Σ weight·focus / Σ weight   over the top-k weights
//! ```
//!
//! This is a deterministic heuristic, not a trained model.

use crate::config::{AnalyticsConfig, DistanceWeights};
use crate::record::Record;
use crate::scores::{clamp, round2, SCORE_MAX};
use crate::stats::average;
use nalgebra::Vector4;
use serde::{Deserialize, Serialize};

/// Returned when there is no history to learn from
pub const NEUTRAL_SCORE: f64 = 5.0;

/// Lower bound of a predicted score
pub const PREDICTION_MIN: f64 = 1.0;

/// Hypothetical inputs to predict from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub coffee: u32,
    pub cig: u32,
    pub sleep: f64,
    pub gaming: f64,
}

impl Scenario {
    #[inline]
    fn as_vector(&self) -> Vector4<f64> {
        Vector4::new(f64::from(self.coffee), f64::from(self.cig), self.sleep, self.gaming)
    }
}

/// Predicted outcome scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub focus: f64,
    pub mood: f64,
}

impl Prediction {
    pub fn neutral() -> Self {
        Self {
            focus: NEUTRAL_SCORE,
            mood: NEUTRAL_SCORE,
        }
    }
}

#[inline]
fn record_vector(record: &Record) -> Vector4<f64> {
    Vector4::new(
        f64::from(record.coffee),
        f64::from(record.cig),
        record.sleep,
        record.gaming,
    )
}

/// Weighted L1 distance between a day and a scenario
#[inline]
pub fn weighted_distance(record: &Record, scenario: &Scenario, weights: &DistanceWeights) -> f64 {
    (record_vector(record) - scenario.as_vector())
        .abs()
        .dot(&weights.as_vector())
}

/// Similarity weight 1 / (1 + d), never zero for finite distances
#[inline]
pub fn similarity(distance: f64) -> f64 {
    1.0 / (1.0 + distance)
}

/// The `k` most similar days with their weights, most similar first.
///
/// The sort is stable, so equally similar days keep history order.
pub fn nearest_neighbors<'a>(
    history: &'a [Record],
    scenario: &Scenario,
    weights: &DistanceWeights,
    k: usize,
) -> Vec<(f64, &'a Record)> {
    let mut weighted: Vec<(f64, &Record)> = history
        .iter()
        .map(|r| (similarity(weighted_distance(r, scenario, weights)), r))
        .collect();

    weighted.sort_by(|a, b| b.0.total_cmp(&a.0));
    weighted.truncate(k);
    weighted
}

/// Predict focus and mood with explicit neighbor settings
pub fn predict_with(history: &[Record], scenario: &Scenario, config: &AnalyticsConfig) -> Prediction {
    if history.is_empty() {
        return Prediction::neutral();
    }

    let neighbors = nearest_neighbors(
        history,
        scenario,
        &config.distance_weights,
        config.neighbor_count,
    );

    let total_weight: f64 = neighbors.iter().map(|(w, _)| w).sum();
    if total_weight == 0.0 {
        let focuses: Vec<f64> = history.iter().map(|r| r.focus).collect();
        let moods: Vec<f64> = history.iter().map(|r| r.mood).collect();
        return Prediction {
            focus: average(&focuses),
            mood: average(&moods),
        };
    }

    let focus = neighbors.iter().map(|(w, r)| w * r.focus).sum::<f64>() / total_weight;
    let mood = neighbors.iter().map(|(w, r)| w * r.mood).sum::<f64>() / total_weight;

    Prediction {
        focus: round2(clamp(focus, PREDICTION_MIN, SCORE_MAX)),
        mood: round2(clamp(mood, PREDICTION_MIN, SCORE_MAX)),
    }
}

/// Predict focus and mood from the 5 most similar days
pub fn predict_from_history(history: &[Record], scenario: &Scenario) -> Prediction {
    predict_with(history, scenario, &AnalyticsConfig::default())
}
