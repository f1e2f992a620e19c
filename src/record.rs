//! Record - one day of behavioral data.
//!
//! A record bundles the raw stimulus inputs of a day with the scores derived
//! from them. Records are built once from user input and never mutated;
//! overwriting a day is delete-then-reinsert at the storage layer.

use crate::error::{DopError, Result};
use crate::scores::{
    calculate_des, calculate_dls, calculate_energy, calculate_focus, calculate_mood, round2,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// Longest plausible sleep in one day
pub const MAX_SLEEP_HOURS: f64 = 24.0;

/// A three-level behavioral sub-rating: 0 (poor), 1 (normal), 2 (good).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const LOW: Rating = Rating(0);
    pub const MID: Rating = Rating(1);
    pub const HIGH: Rating = Rating(2);

    /// Validate a raw value, naming the field in the error
    pub fn new(field: &'static str, value: u8) -> Result<Self> {
        if value <= 2 {
            Ok(Self(value))
        } else {
            Err(DopError::InvalidRating { field, value })
        }
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = DopError;

    fn try_from(value: u8) -> Result<Self> {
        Rating::new("rating", value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

/// The six sub-ratings collected for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehavioralRatings {
    pub deep_work: Rating,
    pub distraction: Rating,
    pub stability: Rating,
    pub satisfaction: Rating,
    pub fatigue: Rating,
    pub sharpness: Rating,
}

impl BehavioralRatings {
    pub fn focus(&self) -> f64 {
        calculate_focus(self.deep_work, self.distraction)
    }

    pub fn mood(&self) -> f64 {
        calculate_mood(self.stability, self.satisfaction)
    }

    pub fn energy(&self) -> f64 {
        calculate_energy(self.fatigue, self.sharpness)
    }
}

/// Raw stimulus and activity inputs for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StimulusInputs {
    /// Cups of coffee
    pub coffee: u32,
    /// Cigarettes smoked
    pub cig: u32,
    /// Hours slept
    pub sleep: f64,
    /// Hours spent gaming
    pub gaming: f64,
    /// Hours spent coding
    pub coding: f64,
}

impl StimulusInputs {
    /// Check hour fields are finite, non-negative and sleep fits in a day
    pub fn validate(&self) -> Result<()> {
        validate_sleep(self.sleep)?;
        validate_non_negative("Gaming", self.gaming)?;
        validate_non_negative("Coding", self.coding)?;
        Ok(())
    }
}

/// Reject negative or non-finite hour values
pub fn validate_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(DopError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(DopError::invalid(field, "cannot be negative"));
    }
    Ok(())
}

/// Sleep must lie in [0, 24]
pub fn validate_sleep(hours: f64) -> Result<()> {
    validate_non_negative("Sleep", hours)?;
    if hours > MAX_SLEEP_HOURS {
        return Err(DopError::invalid("Sleep", "cannot exceed 24 hours"));
    }
    Ok(())
}

fn serialize_round2<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(round2(*value))
}

/// One day's immutable behavioral data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub coffee: u32,
    pub cig: u32,
    #[serde(serialize_with = "serialize_round2")]
    pub sleep: f64,
    #[serde(serialize_with = "serialize_round2")]
    pub gaming: f64,
    #[serde(serialize_with = "serialize_round2")]
    pub coding: f64,
    pub mood: f64,
    pub focus: f64,
    pub energy: f64,
    /// Dopamine Efficiency Score
    #[serde(serialize_with = "serialize_round2")]
    pub des: f64,
    /// Dopamine Load Score
    #[serde(serialize_with = "serialize_round2")]
    pub dls: f64,
}

impl Record {
    /// Build a record from validated inputs, deriving every score
    pub fn from_inputs(
        date: NaiveDate,
        inputs: StimulusInputs,
        ratings: BehavioralRatings,
    ) -> Result<Self> {
        inputs.validate()?;

        let focus = ratings.focus();
        let mood = ratings.mood();
        let energy = ratings.energy();

        Ok(Self {
            date,
            coffee: inputs.coffee,
            cig: inputs.cig,
            sleep: inputs.sleep,
            gaming: inputs.gaming,
            coding: inputs.coding,
            mood,
            focus,
            energy,
            des: calculate_des(focus, mood, energy, inputs.sleep, inputs.coffee, inputs.cig),
            dls: calculate_dls(inputs.coffee, inputs.cig, inputs.gaming),
        })
    }

    /// Check the field ranges of a record that came from outside (e.g. disk)
    pub fn validate(&self) -> Result<()> {
        self.stimulus().validate()?;
        for (field, value) in [
            ("Mood", self.mood),
            ("Focus", self.focus),
            ("Energy", self.energy),
            ("DES", self.des),
            ("DLS", self.dls),
        ] {
            validate_non_negative(field, value)?;
        }
        Ok(())
    }

    /// The raw inputs this record was built from
    pub fn stimulus(&self) -> StimulusInputs {
        StimulusInputs {
            coffee: self.coffee,
            cig: self.cig,
            sleep: self.sleep,
            gaming: self.gaming,
            coding: self.coding,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| DopError::SerializationError(e.to_string()))
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DopError::SerializationError(e.to_string()))
    }
}
