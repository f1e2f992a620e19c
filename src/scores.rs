//! Score derivation.
//!
//! Turns the three pairs of behavioral sub-ratings into unit scores and
//! combines stimulant and sleep inputs into two composite indices:
//! - DES (Dopamine Efficiency Score), clamped to [0, 10]
//! - DLS (Dopamine Load Score), unclamped
//!
//! ```text
//! DES = clamp(0.4·focus + 0.3·mood + 0.3·energy + 0.25·sleep − 0.2·coffee − 0.3·cig, 0, 10)
//! DLS = coffee + cig + gaming
//! ```

use crate::record::Rating;

/// Upper bound of every unit score and of DES
pub const SCORE_MAX: f64 = 10.0;

/// Scale applied to the sum of two sub-ratings (max sum 4 → 10)
pub const RATING_SCALE: f64 = 2.5;

/// Clamp a value into a closed range
#[inline]
pub fn clamp(value: f64, lower: f64, upper: f64) -> f64 {
    value.max(lower).min(upper)
}

/// Round to 2 decimal places.
///
/// Rounds the exact binary value through its decimal expansion, ties to
/// even, so `0.125` gives `0.12` and `2.675` (stored as 2.67499..) gives
/// `2.67`. Negative zero comes back as `0.0`.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse::<f64>().map_or(value, |v| v + 0.0)
}

#[inline]
fn combine(a: Rating, b: Rating) -> f64 {
    (f64::from(a.get()) + f64::from(b.get())) * RATING_SCALE
}

/// Focus from deep-work capability and distraction level.
///
/// Output is one of {0, 2.5, 5, 7.5, 10}.
#[inline]
pub fn calculate_focus(deep_work: Rating, distraction: Rating) -> f64 {
    combine(deep_work, distraction)
}

/// Mood from emotional stability and satisfaction with the day
#[inline]
pub fn calculate_mood(stability: Rating, satisfaction: Rating) -> f64 {
    combine(stability, satisfaction)
}

/// Energy from physical fatigue and mental sharpness
#[inline]
pub fn calculate_energy(fatigue: Rating, sharpness: Rating) -> f64 {
    combine(fatigue, sharpness)
}

/// Dopamine Efficiency Score.
///
/// Clamping happens after the weighted sum, never per term, and rounding
/// after clamping.
pub fn calculate_des(focus: f64, mood: f64, energy: f64, sleep: f64, coffee: u32, cig: u32) -> f64 {
    let des = focus * 0.4 + mood * 0.3 + energy * 0.3 + sleep * 0.25
        - f64::from(coffee) * 0.2
        - f64::from(cig) * 0.3;
    round2(clamp(des, 0.0, SCORE_MAX))
}

/// Dopamine Load Score
#[inline]
pub fn calculate_dls(coffee: u32, cig: u32, gaming: f64) -> f64 {
    round2(f64::from(coffee) + f64::from(cig) + gaming)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(v: u8) -> Rating {
        Rating::new("test", v).unwrap()
    }

    #[test]
    fn test_rating_composites() {
        assert_eq!(calculate_focus(r(0), r(0)), 0.0);
        assert_eq!(calculate_focus(r(1), r(2)), 7.5);
        assert_eq!(calculate_mood(r(2), r(2)), 10.0);
        assert_eq!(calculate_energy(r(1), r(1)), 5.0);
    }

    #[test]
    fn test_des_formula() {
        // 0.4*5 + 0.3*5 + 0.3*5 + 0.25*8 - 0.2*2 - 0.3*1 = 6.3
        assert_eq!(calculate_des(5.0, 5.0, 5.0, 8.0, 2, 1), 6.3);
    }

    #[test]
    fn test_des_clamps_after_sum() {
        assert_eq!(calculate_des(10.0, 10.0, 10.0, 24.0, 0, 0), 10.0);
        assert_eq!(calculate_des(0.0, 0.0, 0.0, 0.0, 10, 10), 0.0);
        // A negative cig term is absorbed by the positive terms before clamping
        assert_eq!(calculate_des(10.0, 10.0, 10.0, 0.0, 0, 10), 7.0);
    }

    #[test]
    fn test_dls() {
        assert_eq!(calculate_dls(0, 0, 0.0), 0.0);
        assert_eq!(calculate_dls(3, 2, 1.25), 6.25);
        assert_eq!(calculate_dls(20, 20, 10.0), 50.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_000_1), 1.24);
        assert_eq!(round2(-0.0), 0.0);
        assert!(!round2(-0.0).is_sign_negative());
        assert!(!round2(-0.001).is_sign_negative());
    }

    #[test]
    fn test_round2_ties_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(-0.125), -0.12);
        assert!(round2(f64::NAN).is_nan());
    }

    #[test]
    fn test_scores_round_ties_to_even() {
        assert_eq!(calculate_dls(0, 0, 0.125), 0.12);
        // 0.25 * 0.5
        assert_eq!(calculate_des(0.0, 0.0, 0.0, 0.5, 0, 0), 0.12);
    }
}
