//! Pure text rendering for reports and failures.

use std::fmt::Write;

use crate::{
    error::FetchError,
    model::{ComparisonReport, CurrentConditions, ForecastDay, ForecastResult},
    units::{UnitPolicy, Units},
};

pub const RULE_WIDTH: usize = 60;
const DAY_RULE: &str = "-------------------";

/// Which operation a failure message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CurrentWeather,
    Forecast,
}

impl Operation {
    fn noun(&self) -> &'static str {
        match self {
            Operation::CurrentWeather => "weather",
            Operation::Forecast => "forecast",
        }
    }
}

pub fn current_report(cc: &CurrentConditions, units: Units) -> String {
    let policy = UnitPolicy::resolve(units);
    let temp = policy.select(cc.temperature);
    let feels = policy.select(cc.feels_like);
    let visibility = match cc.visibility_km {
        Some(km) => format!("{km} km"),
        None => "N/A".to_string(),
    };

    format!(
        "Current Weather in {name}, {country}\n\
         \n\
         📍 Location: {lat}, {lon}\n\
         🌡️  Temperature: {temp}{t}\n\
         🤔 Feels Like: {feels}{t}\n\
         ☁️  Condition: {condition}\n\
         💧 Humidity: {humidity}%\n\
         🔽 Pressure: {pressure} hPa\n\
         💨 Wind Speed: {wind} {s}\n\
         ☁️  Cloudiness: {cloud}%\n\
         👁️  Visibility: {visibility}\n",
        name = cc.name,
        country = cc.country,
        lat = cc.lat,
        lon = cc.lon,
        t = policy.temp_suffix,
        condition = cc.condition,
        humidity = cc.humidity_pct,
        pressure = cc.pressure_mb,
        wind = cc.wind_kph,
        s = policy.speed_suffix,
        cloud = cc.cloud_pct,
    )
}

/// Always shows Celsius and Fahrenheit side by side.
pub fn forecast_day(day: &ForecastDay) -> String {
    format!(
        "📅 {date}\n\
         🌡 Max: {max_c}°C / {max_f}°F\n\
         🌡 Min: {min_c}°C / {min_f}°F\n\
         🌤 Condition: {condition}\n\
         🌧 Chance of rain: {rain}%\n\
         🌅 Sunrise: {sunrise}\n\
         🌇 Sunset: {sunset}\n\
         {DAY_RULE}\n",
        date = day.date.format("%Y-%m-%d"),
        max_c = day.max_temp.metric,
        max_f = day.max_temp.imperial,
        min_c = day.min_temp.metric,
        min_f = day.min_temp.imperial,
        condition = day.condition,
        rain = day.chance_of_rain_pct,
        sunrise = day.sunrise,
        sunset = day.sunset,
    )
}

pub fn shortfall_warning(available: usize) -> String {
    format!("⚠️ Only {available} days available, likely due to WeatherAPI plan limits.")
}

pub fn forecast_report(result: &ForecastResult) -> String {
    let mut out = format!("🌦 Forecast for {} (requested {} days)\n", result.city, result.requested);

    if result.is_partial() {
        let _ = writeln!(out, "\n{}", shortfall_warning(result.available()));
    }

    for day in &result.days {
        out.push('\n');
        out.push_str(&forecast_day(day));
    }

    out
}

pub fn comparison_report(report: &ComparisonReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "Weather Comparison\n{rule}\n\n{first}\n\n{rule}\n\n{second}\n\n{rule}\n",
        first = report.first.trim_end(),
        second = report.second.trim_end(),
    )
}

pub fn failure(operation: Operation, err: &FetchError) -> String {
    match err {
        FetchError::MissingCredential => format!("Error: {err}"),
        FetchError::Status { code, body } => format!("HTTP Error: {code} - {body}"),
        other => format!("Error fetching {}: {other}", operation.noun()),
    }
}
