use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::units::{UnitPair, Units};

pub const MIN_FORECAST_DAYS: u8 = 1;
pub const MAX_FORECAST_DAYS: u8 = 10;
pub const DEFAULT_FORECAST_DAYS: i64 = 3;

/// Constrain a requested forecast length to what the provider accepts.
pub fn clamp_days(days: i64) -> u8 {
    days.clamp(i64::from(MIN_FORECAST_DAYS), i64::from(MAX_FORECAST_DAYS)) as u8
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    pub city: String,
    pub units: Units,
    /// Only set for forecasts, already clamped.
    pub days: Option<u8>,
}

impl WeatherQuery {
    pub fn current(city: impl Into<String>, units: Units) -> Self {
        Self { city: city.into(), units, days: None }
    }

    /// Out-of-range `days` are corrected, never rejected.
    pub fn forecast(city: impl Into<String>, days: i64, units: Units) -> Self {
        Self { city: city.into(), units, days: Some(clamp_days(days)) }
    }
}

/// Normalized current conditions for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub temperature: UnitPair,
    pub feels_like: UnitPair,
    pub condition: String,
    pub humidity_pct: u8,
    pub pressure_mb: f64,
    pub wind_kph: f64,
    pub cloud_pct: u8,
    /// The provider omits visibility for some stations.
    pub visibility_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp: UnitPair,
    pub min_temp: UnitPair,
    pub condition: String,
    pub chance_of_rain_pct: u8,
    pub sunrise: String,
    pub sunset: String,
}

/// The days the provider actually returned for a forecast request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub city: String,
    pub requested: u8,
    pub days: Vec<ForecastDay>,
}

impl ForecastResult {
    pub fn available(&self) -> usize {
        self.days.len()
    }

    /// Free provider plans silently cut forecasts short.
    pub fn is_partial(&self) -> bool {
        self.available() < usize::from(self.requested)
    }
}

/// Two rendered current-conditions reports, in the order the cities were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    pub first: String,
    pub second: String,
}
