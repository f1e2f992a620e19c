//! Interactive input collection.
//!
//! Generic over reader and writer so the same code drives a terminal and
//! in-memory buffers.

use crate::error::{DopError, Result};
use crate::predict::Scenario;
use crate::record::{validate_non_negative, validate_sleep, BehavioralRatings, Rating, StimulusInputs};
use std::io::{BufRead, Write};
use std::str::FromStr;

const RETRY: &str = "Invalid input. Please try again.";

/// Line-oriented prompter
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line of text
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Read one trimmed line; end of input is an error
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(DopError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed",
            )));
        }
        Ok(line.trim().to_string())
    }

    /// Ask until the answer parses as `T`
    pub fn ask<T: FromStr>(&mut self, prompt: &str) -> Result<T> {
        loop {
            let line = self.read_line(prompt)?;
            match line.parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.say(RETRY)?,
            }
        }
    }

    /// Ask until `check` accepts the parsed answer
    pub fn ask_valid<T, F>(&mut self, prompt: &str, check: F) -> Result<T>
    where
        T: FromStr,
        F: Fn(&T) -> Result<()>,
    {
        loop {
            let value: T = self.ask(prompt)?;
            match check(&value) {
                Ok(()) => return Ok(value),
                Err(err) if err.is_recoverable() => self.say(&format!("{}. {}", err, RETRY))?,
                Err(err) => return Err(err),
            }
        }
    }

    /// Show a 0/1/2 menu and read a rating
    pub fn ask_rating(&mut self, field: &'static str, heading: &str, labels: [&str; 3]) -> Result<Rating> {
        self.say(heading)?;
        for (i, label) in labels.iter().enumerate() {
            self.say(&format!("{} = {}", i, label))?;
        }
        loop {
            let raw: u8 = self.ask("Select (0-2): ")?;
            match Rating::new(field, raw) {
                Ok(rating) => return Ok(rating),
                Err(err) => self.say(&format!("{}. {}", err, RETRY))?,
            }
        }
    }

    fn ask_hours(&mut self, prompt: &str, field: &'static str) -> Result<f64> {
        self.ask_valid(prompt, |v: &f64| {
            validate_non_negative(field, *v)
        })
    }

    fn ask_sleep(&mut self) -> Result<f64> {
        self.ask_valid("Sleep hours: ", |v: &f64| validate_sleep(*v))
    }

    /// Collect the raw inputs of a day
    pub fn stimulus_inputs(&mut self) -> Result<StimulusInputs> {
        let coffee = self.ask("Coffee cups: ")?;
        let cig = self.ask("Cigarettes: ")?;
        let sleep = self.ask_sleep()?;
        let gaming = self.ask_hours("Gaming hours: ", "Gaming")?;
        let coding = self.ask_hours("Coding hours: ", "Coding")?;
        Ok(StimulusInputs {
            coffee,
            cig,
            sleep,
            gaming,
            coding,
        })
    }

    /// Collect the six behavioral sub-ratings
    pub fn behavioral_ratings(&mut self) -> Result<BehavioralRatings> {
        self.say("\n--- Behavioral Assessment ---")?;

        self.say("\nFocus Assessment:")?;
        let deep_work = self.ask_rating(
            "Deep work",
            "Deep Work Capability:",
            ["Couldn't focus", "Some focus", "Deep focus possible"],
        )?;
        let distraction = self.ask_rating(
            "Distraction",
            "Distraction Level:",
            ["Constantly distracted", "Sometimes distracted", "Rarely distracted"],
        )?;

        self.say("\nMood Assessment:")?;
        let stability = self.ask_rating(
            "Stability",
            "Emotional Stability:",
            ["Irritable / unstable", "Normal", "Calm / positive"],
        )?;
        let satisfaction = self.ask_rating(
            "Satisfaction",
            "Satisfaction With Day:",
            ["Bad day", "Neutral", "Good day"],
        )?;

        self.say("\nEnergy Assessment:")?;
        let fatigue = self.ask_rating(
            "Fatigue",
            "Physical Fatigue:",
            ["Exhausted", "Normal", "Energized"],
        )?;
        let sharpness = self.ask_rating(
            "Sharpness",
            "Mental Sharpness:",
            ["Foggy", "Normal", "Sharp"],
        )?;

        Ok(BehavioralRatings {
            deep_work,
            distraction,
            stability,
            satisfaction,
            fatigue,
            sharpness,
        })
    }

    /// Collect hypothetical inputs for a prediction
    pub fn scenario(&mut self) -> Result<Scenario> {
        let coffee = self.ask("Coffee cups: ")?;
        let cig = self.ask("Cigarettes: ")?;
        let sleep = self.ask_sleep()?;
        let gaming = self.ask_hours("Gaming hours: ", "Gaming")?;
        Ok(Scenario {
            coffee,
            cig,
            sleep,
            gaming,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_retries_on_garbage() {
        let mut p = prompter("abc\n-1\n3\n");
        // "-1" does not parse as u32 either
        let value: u32 = p.ask("Coffee cups: ").unwrap();
        assert_eq!(value, 3);

        let out = String::from_utf8(p.output).unwrap();
        assert_eq!(out.matches(RETRY).count(), 2);
    }

    #[test]
    fn test_eof_is_error() {
        let mut p = prompter("");
        assert!(p.ask::<u32>("Coffee cups: ").is_err());
    }

    #[test]
    fn test_sleep_range_reprompts() {
        let mut p = prompter("30\n7.5\n");
        let sleep = p.ask_sleep().unwrap();
        assert_eq!(sleep, 7.5);
    }

    #[test]
    fn test_stimulus_inputs() {
        let mut p = prompter("2\n1\n7\n1.5\n4\n");
        let inputs = p.stimulus_inputs().unwrap();
        assert_eq!(inputs.coffee, 2);
        assert_eq!(inputs.cig, 1);
        assert_eq!(inputs.gaming, 1.5);
        assert_eq!(inputs.coding, 4.0);
    }

    #[test]
    fn test_ratings_reject_out_of_range() {
        let mut p = prompter("5\n2\n1\n1\n1\n0\n2\n");
        let ratings = p.behavioral_ratings().unwrap();
        assert_eq!(ratings.deep_work, Rating::HIGH);
        assert_eq!(ratings.focus(), 7.5);
        assert_eq!(ratings.fatigue, Rating::LOW);
        assert_eq!(ratings.sharpness, Rating::HIGH);
    }

    #[test]
    fn test_scenario() {
        let mut p = prompter("3\n0\n6\n2\n");
        let s = p.scenario().unwrap();
        assert_eq!(s.coffee, 3);
        assert_eq!(s.sleep, 6.0);
        assert_eq!(s.gaming, 2.0);
    }
}
