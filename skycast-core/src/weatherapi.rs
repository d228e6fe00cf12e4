//! Response shapes of the WeatherAPI.com `current.json` and `forecast.json` endpoints.
//!
//! Only the fields the reports need are declared; everything else is ignored.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::FetchError,
    model::{CurrentConditions, ForecastDay, ForecastResult},
    units::UnitPair,
};

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    temp_f: f64,
    feelslike_c: f64,
    feelslike_f: f64,
    condition: WaCondition,
    humidity: u8,
    pressure_mb: f64,
    wind_kph: f64,
    cloud: u8,
    vis_km: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    maxtemp_f: f64,
    mintemp_c: f64,
    mintemp_f: f64,
    condition: WaCondition,
    daily_chance_of_rain: u8,
}

#[derive(Debug, Deserialize)]
struct WaAstro {
    sunrise: String,
    sunset: String,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
    astro: WaAstro,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    forecast: WaForecast,
}

pub fn parse_current(value: serde_json::Value) -> Result<CurrentConditions, FetchError> {
    let parsed: WaResponse = serde_json::from_value(value)?;
    let WaResponse { location, current } = parsed;

    Ok(CurrentConditions {
        name: location.name,
        country: location.country,
        lat: location.lat,
        lon: location.lon,
        temperature: UnitPair::new(current.temp_c, current.temp_f),
        feels_like: UnitPair::new(current.feelslike_c, current.feelslike_f),
        condition: current.condition.text,
        humidity_pct: current.humidity,
        pressure_mb: current.pressure_mb,
        wind_kph: current.wind_kph,
        cloud_pct: current.cloud,
        visibility_km: current.vis_km,
    })
}

pub fn parse_forecast(
    city: &str,
    requested: u8,
    value: serde_json::Value,
) -> Result<ForecastResult, FetchError> {
    let parsed: WaForecastResponse = serde_json::from_value(value)?;

    let days = parsed
        .forecast
        .forecastday
        .into_iter()
        .map(|fd| ForecastDay {
            date: fd.date,
            max_temp: UnitPair::new(fd.day.maxtemp_c, fd.day.maxtemp_f),
            min_temp: UnitPair::new(fd.day.mintemp_c, fd.day.mintemp_f),
            condition: fd.day.condition.text,
            chance_of_rain_pct: fd.day.daily_chance_of_rain,
            sunrise: fd.astro.sunrise,
            sunset: fd.astro.sunset,
        })
        .collect();

    Ok(ForecastResult { city: city.to_string(), requested, days })
}
