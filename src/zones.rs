//! Optimal zone detection.
//!
//! Groups the history by an input (coffee cups, a 2-hour sleep bucket,
//! cigarette count) and finds the group with the best average focus.
//!
//! Grouping keeps keys in first-insertion order. Scans over groups follow
//! that order, and a later group only replaces the current best when its
//! average is strictly greater, so ties go to the key seen first in the
//! history.

use crate::record::Record;
use crate::stats::average;
use serde::{Deserialize, Serialize};

/// Sentinel for every zone when the history is empty
pub const NO_DATA: &str = "No data";

/// Sentinel when no cigarette count shows a focus decline
pub const NO_CLEAR_THRESHOLD: &str = "No clear threshold";

/// Width of a sleep bucket in hours
pub const SLEEP_BUCKET_WIDTH: f64 = 2.0;

/// Mood at or above which a day counts as stable
pub const STABLE_MOOD: f64 = 7.0;

/// Focus drop below the zero/lowest-cigarette baseline that marks a decline
pub const DECLINE_MARGIN: f64 = 1.0;

/// Key → values association that remembers first-insertion order.
///
/// Histories are small, so a linear key lookup is fine.
#[derive(Debug, Clone)]
pub struct OrderedGroups<K> {
    groups: Vec<(K, Vec<f64>)>,
}

impl<K: PartialEq> OrderedGroups<K> {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Append `value` to the group for `key`, creating it at the end if new
    pub fn push(&mut self, key: K, value: f64) {
        match self.groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.groups.push((key, vec![value])),
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[f64])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Key with the highest group average; the first-inserted key wins ties
    pub fn best_by_average(&self) -> Option<(&K, f64)> {
        let mut best: Option<(&K, f64)> = None;
        for (key, values) in self.iter() {
            let avg = average(values);
            match best {
                Some((_, best_avg)) if avg <= best_avg => {}
                _ => best = Some((key, avg)),
            }
        }
        best
    }

    /// Consume into a list sorted by key
    pub fn into_sorted(self) -> Vec<(K, Vec<f64>)>
    where
        K: Ord,
    {
        let mut groups = self.groups;
        groups.sort_by(|a, b| a.0.cmp(&b.0));
        groups
    }
}

impl<K: PartialEq> Default for OrderedGroups<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sleep bucket label, e.g. 5.5h → "4.0-5.9"
pub fn bucket_range(value: f64, width: f64) -> String {
    let lower = (value / width).floor() * width;
    let upper = lower + width - 0.1;
    format!("{:.1}-{:.1}", lower, upper)
}

/// Descriptive optimal zones, one string per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalZone {
    /// Best coffee count for focus
    pub coffee: String,
    /// Best sleep bucket for focus
    pub sleep: String,
    /// Cigarette count from which focus declines
    pub cig_threshold: String,
    /// Minimum sleep seen on stable-mood days
    pub stable_mood_sleep: String,
}

impl OptimalZone {
    pub fn no_data() -> Self {
        Self {
            coffee: NO_DATA.to_string(),
            sleep: NO_DATA.to_string(),
            cig_threshold: NO_DATA.to_string(),
            stable_mood_sleep: NO_DATA.to_string(),
        }
    }
}

/// First cigarette count whose average focus falls more than
/// [`DECLINE_MARGIN`] below the lowest count's average
pub fn cig_decline_threshold(cig_groups: OrderedGroups<u32>) -> Option<u32> {
    let sorted = cig_groups.into_sorted();
    let (_, first) = sorted.first()?;
    let baseline = average(first);

    sorted[1..]
        .iter()
        .find(|(_, focuses)| average(focuses) < baseline - DECLINE_MARGIN)
        .map(|(cig, _)| *cig)
}

/// Smallest sleep among stable-mood days, or among all days if there are none
pub fn stable_mood_min_sleep(history: &[Record]) -> Option<f64> {
    history
        .iter()
        .filter(|r| r.mood >= STABLE_MOOD)
        .map(|r| r.sleep)
        .reduce(f64::min)
        .or_else(|| history.iter().map(|r| r.sleep).reduce(f64::min))
}

/// Determine optimal behavioral zones from the history
pub fn detect_optimal_zone(history: &[Record]) -> OptimalZone {
    if history.is_empty() {
        return OptimalZone::no_data();
    }

    let mut coffee_groups = OrderedGroups::new();
    let mut sleep_groups = OrderedGroups::new();
    let mut cig_groups = OrderedGroups::new();

    for record in history {
        coffee_groups.push(record.coffee, record.focus);
        sleep_groups.push(bucket_range(record.sleep, SLEEP_BUCKET_WIDTH), record.focus);
        cig_groups.push(record.cig, record.focus);
    }

    // Non-empty history guarantees at least one group in each
    let coffee = coffee_groups
        .best_by_average()
        .map(|(cups, _)| format!("{} cups/day", cups))
        .unwrap_or_else(|| NO_DATA.to_string());
    let sleep = sleep_groups
        .best_by_average()
        .map(|(bucket, _)| format!("{} hours", bucket))
        .unwrap_or_else(|| NO_DATA.to_string());

    let cig_threshold = cig_decline_threshold(cig_groups)
        .map(|cig| format!(">= {} cig/day", cig))
        .unwrap_or_else(|| NO_CLEAR_THRESHOLD.to_string());

    let stable_mood_sleep = stable_mood_min_sleep(history)
        .map(|hours| format!("{:.1}h", hours))
        .unwrap_or_else(|| NO_DATA.to_string());

    OptimalZone {
        coffee,
        sleep,
        cig_threshold,
        stable_mood_sleep,
    }
}
