//! WebAssembly bindings.
//!
//! Histories and records cross the boundary as JSON strings in the same
//! shape as the data file; results come back as JSON strings.

use crate::config::AnalyticsConfig;
use crate::engine::DopModel;
use crate::predict::Scenario;
use crate::record::Record;
use crate::scores;
use wasm_bindgen::prelude::*;

fn parse_history(history_json: &str) -> Result<Vec<Record>, JsValue> {
    serde_json::from_str(history_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid history: {}", e)))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))?;
    Ok(JsValue::from_str(&json))
}

/// Stateful engine bound to one configuration
#[wasm_bindgen]
pub struct WasmDopEngine {
    model: DopModel,
}

#[wasm_bindgen]
impl WasmDopEngine {
    /// Create an engine with default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        crate::init();
        Self {
            model: DopModel::new(),
        }
    }

    /// Create an engine from a JSON configuration
    #[wasm_bindgen(js_name = "withConfig")]
    pub fn with_config(config_json: &str) -> Result<WasmDopEngine, JsValue> {
        let config = AnalyticsConfig::from_json(config_json)?;
        Ok(Self {
            model: DopModel::with_config(config),
        })
    }

    /// Entry report for `record_json` against `history_json`
    #[wasm_bindgen(js_name = "entryReport")]
    pub fn entry_report(&self, record_json: &str, history_json: &str) -> Result<JsValue, JsValue> {
        let record = Record::from_json(record_json)?;
        let history = parse_history(history_json)?;
        let report = self.model.entry_report(&record, &history);
        Ok(JsValue::from_str(&report.to_json()?))
    }

    #[wasm_bindgen(js_name = "detectOptimalZone")]
    pub fn detect_optimal_zone(&self, history_json: &str) -> Result<JsValue, JsValue> {
        let history = parse_history(history_json)?;
        to_js(&self.model.optimal_zone(&history))
    }

    #[wasm_bindgen(js_name = "predictFromHistory")]
    pub fn predict_from_history(
        &self,
        history_json: &str,
        coffee: u32,
        cig: u32,
        sleep: f64,
        gaming: f64,
    ) -> Result<JsValue, JsValue> {
        let history = parse_history(history_json)?;
        let scenario = Scenario {
            coffee,
            cig,
            sleep,
            gaming,
        };
        to_js(&self.model.predict(&history, &scenario))
    }

    #[wasm_bindgen(js_name = "sleepDebt")]
    pub fn sleep_debt(&self, history_json: &str) -> Result<f64, JsValue> {
        let history = parse_history(history_json)?;
        Ok(self.model.sleep_debt(&history))
    }

    /// Get engine version
    #[wasm_bindgen(js_name = "version")]
    pub fn version() -> String {
        crate::VERSION.to_string()
    }
}

impl Default for WasmDopEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Standalone DES calculation
#[wasm_bindgen(js_name = "calculateDes")]
pub fn calculate_des(focus: f64, mood: f64, energy: f64, sleep: f64, coffee: u32, cig: u32) -> f64 {
    scores::calculate_des(focus, mood, energy, sleep, coffee, cig)
}

/// Standalone DLS calculation
#[wasm_bindgen(js_name = "calculateDls")]
pub fn calculate_dls(coffee: u32, cig: u32, gaming: f64) -> f64 {
    scores::calculate_dls(coffee, cig, gaming)
}

/// Flag messages for one record
#[wasm_bindgen(js_name = "detectFlags")]
pub fn detect_flags(record_json: &str, overstim_threshold: f64) -> Result<JsValue, JsValue> {
    let record = Record::from_json(record_json)?;
    let messages: Vec<&str> = crate::flags::detect_flags(&record, overstim_threshold)
        .iter()
        .map(|f| f.message())
        .collect();
    to_js(&messages)
}

/// "LOW", "MODERATE" or "HIGH"
#[wasm_bindgen(js_name = "predictCrashRisk")]
pub fn predict_crash_risk(record_json: &str) -> Result<String, JsValue> {
    let record = Record::from_json(record_json)?;
    Ok(crate::risk::predict_crash_risk(&record).as_str().to_string())
}

#[wasm_bindgen(js_name = "detectSleepDebt")]
pub fn detect_sleep_debt(history_json: &str, ideal_sleep: f64) -> Result<f64, JsValue> {
    let history = parse_history(history_json)?;
    Ok(crate::risk::detect_sleep_debt(&history, ideal_sleep))
}
