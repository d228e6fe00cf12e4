use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-chosen temperature preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only the exact selector `"metric"` picks Celsius; anything else is Fahrenheit.
impl From<&str> for Units {
    fn from(value: &str) -> Self {
        if value == "metric" { Units::Metric } else { Units::Imperial }
    }
}

/// A reading the provider reports in both unit systems at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitPair {
    pub metric: f64,
    pub imperial: f64,
}

impl UnitPair {
    pub fn new(metric: f64, imperial: f64) -> Self {
        Self { metric, imperial }
    }
}

/// Which fields to read and which symbols to print for a [`Units`] selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPolicy {
    units: Units,
    pub temp_suffix: &'static str,
    pub speed_suffix: &'static str,
}

impl UnitPolicy {
    pub fn resolve(units: Units) -> Self {
        let temp_suffix = match units {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        };

        // WeatherAPI only reports wind in kph here, whatever the temperature unit.
        Self { units, temp_suffix, speed_suffix: "kph" }
    }

    pub fn select(&self, pair: UnitPair) -> f64 {
        match self.units {
            Units::Metric => pair.metric,
            Units::Imperial => pair.imperial,
        }
    }
}
