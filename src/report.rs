//! Terminal rendering of analytics results.
//!
//! Everything renders to a `String` (or a `Display` view); the binary
//! decides where it goes.

use crate::engine::EntryReport;
use crate::predict::Prediction;
use crate::record::Record;
use crate::risk::{CrashRisk, EfficiencyStatus, StimulationLevel};
use crate::stats::WeeklySummary;
use crate::zones::OptimalZone;
use std::fmt;

/// ANSI escape codes
pub struct Color;

impl Color {
    pub const RED: &'static str = "\x1b[91m";
    pub const GREEN: &'static str = "\x1b[92m";
    pub const YELLOW: &'static str = "\x1b[93m";
    pub const CYAN: &'static str = "\x1b[96m";
    pub const MAGENTA: &'static str = "\x1b[95m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const RESET: &'static str = "\x1b[0m";
}

/// Two-decimal formatting used for every score
pub fn float_fmt(value: f64) -> String {
    format!("{:.2}", value)
}

/// ASCII bar, e.g. `[█████-----] 5.00/10`
pub fn progress_bar(value: f64, max_value: f64, width: usize) -> String {
    let ratio = if max_value > 0.0 {
        (value / max_value).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64) as usize;
    format!(
        "[{}{}] {:.2}/{}",
        "█".repeat(filled),
        "-".repeat(width - filled),
        value,
        max_value
    )
}

fn efficiency_color(status: EfficiencyStatus) -> &'static str {
    match status {
        EfficiencyStatus::LockedIn => Color::GREEN,
        EfficiencyStatus::Stable => Color::YELLOW,
        EfficiencyStatus::Low => Color::RED,
    }
}

fn stimulation_color(level: StimulationLevel) -> &'static str {
    match level {
        StimulationLevel::High => Color::RED,
        StimulationLevel::Moderate => Color::YELLOW,
        StimulationLevel::Controlled => Color::GREEN,
    }
}

fn risk_color(risk: CrashRisk) -> &'static str {
    match risk {
        CrashRisk::High => Color::RED,
        CrashRisk::Moderate => Color::YELLOW,
        CrashRisk::Low => Color::GREEN,
    }
}

/// Full styled diagnostic for one day
pub struct EntryView<'a> {
    pub record: &'a Record,
    pub report: &'a EntryReport,
    pub title: &'a str,
}

impl fmt::Display for EntryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (record, report) = (self.record, self.report);
        let (cyan, bold, reset) = (Color::CYAN, Color::BOLD, Color::RESET);

        writeln!(f, "\n{cyan}{bold}══════════ DOP SYSTEM REPORT ══════════{reset}")?;
        writeln!(f, "{}{} ({}){reset}", Color::MAGENTA, self.title, record.date)?;

        writeln!(f, "\nInputs:")?;
        writeln!(
            f,
            "  Coffee: {} | Cigarettes: {} | Sleep: {}h | Gaming: {}h | Coding: {}h",
            record.coffee,
            record.cig,
            float_fmt(record.sleep),
            float_fmt(record.gaming),
            float_fmt(record.coding)
        )?;

        writeln!(f, "\nOutputs:")?;
        writeln!(
            f,
            "  Mood: {}/10 | Focus: {}/10 | Energy: {}/10",
            record.mood, record.focus, record.energy
        )?;

        writeln!(f, "\nScores:")?;
        writeln!(f, "\nDopamine Efficiency Score (DES):")?;
        writeln!(f, "{cyan}{}{reset}", progress_bar(report.des, 10.0, 30))?;
        writeln!(
            f,
            "\nDopamine Load Score (DLS): {}{}{reset}",
            Color::YELLOW,
            float_fmt(report.dls)
        )?;

        writeln!(
            f,
            "\n{}Status: {}{reset}",
            efficiency_color(report.efficiency),
            report.efficiency.describe()
        )?;
        writeln!(
            f,
            "{}Stimulation Level: {}{reset}",
            stimulation_color(report.stimulation),
            report.stimulation.describe()
        )?;

        if report.sleep_debt > 0.0 {
            writeln!(
                f,
                "\n{}Sleep Debt (Last 7 Days): {:.2} hours owed{reset}",
                Color::RED,
                report.sleep_debt
            )?;
        } else {
            writeln!(f, "\n{}Sleep Debt: Cleared{reset}", Color::GREEN)?;
        }

        let warn = if report.crash_risk == CrashRisk::High { " ⚠" } else { "" };
        writeln!(
            f,
            "{}Next-Day Crash Risk: {}{warn}{reset}",
            risk_color(report.crash_risk),
            report.crash_risk
        )?;

        if !report.flags.is_empty() {
            writeln!(f, "\n{}Alerts:{reset}", Color::RED)?;
            for flag in &report.flags {
                writeln!(f, "  - {}", flag)?;
            }
        }

        writeln!(f, "{cyan}{bold}═══════════════════════════════════════{reset}")
    }
}

pub fn render_entry(record: &Record, report: &EntryReport, title: &str) -> String {
    EntryView {
        record,
        report,
        title,
    }
    .to_string()
}

pub fn render_weekly(summary: &WeeklySummary) -> String {
    format!(
        "\n=== Weekly Analysis ===\n\
         Entries analyzed: {}\n\
         Average mood: {}\n\
         Average focus: {}\n\
         Average DES: {}\n\
         Sleep vs Focus correlation: {}\n\
         Coffee vs Focus correlation: {}\n\
         Cig vs Focus correlation: {}\n",
        summary.entries,
        float_fmt(summary.avg_mood),
        float_fmt(summary.avg_focus),
        float_fmt(summary.avg_des),
        float_fmt(summary.sleep_focus_r),
        float_fmt(summary.coffee_focus_r),
        float_fmt(summary.cig_focus_r)
    )
}

pub fn render_zone(zone: &OptimalZone) -> String {
    format!(
        "\n=== Optimal Zone Detection ===\n\
         Best coffee range for focus: {}\n\
         Best sleep range for focus: {}\n\
         Cigarette decline threshold: {}\n\
         Minimum sleep for stable mood: {}\n",
        zone.coffee, zone.sleep, zone.cig_threshold, zone.stable_mood_sleep
    )
}

pub fn render_prediction(prediction: &Prediction) -> String {
    format!(
        "\n=== Prediction ===\nLikely focus: {}/10\nLikely mood: {}/10\n",
        float_fmt(prediction.focus),
        float_fmt(prediction.mood)
    )
}
