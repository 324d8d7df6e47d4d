//! Temperature sensor filtering and normalization.

use std::collections::BTreeMap;

use super::metrics::{RawSensorReading, TemperatureMode, LIVE_INPUT_SUFFIX};
use crate::core::units::celsius_to_fahrenheit;

/// Converts raw sensor enumerations into display labels and integer degrees
#[derive(Debug, Clone, Copy)]
pub struct SensorFilter {
    mode: TemperatureMode,
}

impl SensorFilter {
    pub fn new(mode: TemperatureMode) -> Self {
        Self { mode }
    }

    /// Display label for a live-input key, `None` for metadata keys.
    pub fn live_label(key: &str) -> Option<&str> {
        key.strip_suffix(LIVE_INPUT_SUFFIX)
            .filter(|label| !label.is_empty())
    }

    /// Convert one reading, or `None` if it carries no live value.
    ///
    /// A raw value of exactly zero means "no reading", not 0 degrees.
    pub fn convert(&self, reading: &RawSensorReading) -> Option<(String, i32)> {
        let label = Self::live_label(&reading.key)?;
        if reading.temperature == 0.0 || !reading.temperature.is_finite() {
            return None;
        }

        let celsius = reading.temperature as i32;
        let value = match self.mode {
            TemperatureMode::Celsius => celsius,
            TemperatureMode::Fahrenheit => celsius_to_fahrenheit(celsius),
        };

        Some((label.to_string(), value))
    }

    /// Convert every live reading, keeping source order.
    pub fn convert_all(&self, readings: &[RawSensorReading]) -> Vec<(String, i32)> {
        readings.iter().filter_map(|r| self.convert(r)).collect()
    }

    /// Write every live reading into `into`, overwriting earlier values per label.
    pub fn apply(&self, readings: &[RawSensorReading], into: &mut BTreeMap<String, i32>) {
        into.extend(self.convert_all(readings));
    }
}
