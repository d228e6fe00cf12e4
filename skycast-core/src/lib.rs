//! Core library for the `skycast` weather reports.
//!
//! This crate defines:
//! - The transport gateway to WeatherAPI.com and its failure taxonomy
//! - Unit selection and the normalized domain model
//! - Text rendering for current conditions, forecasts and comparisons
//! - Configuration & credentials handling
//!
//! It is used by `skycast-cli`, but can also be embedded in any host that wants
//! plain-text weather reports.

pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod service;
pub mod transport;
pub mod units;
pub mod weatherapi;

pub use config::Config;
pub use error::FetchError;
pub use model::{ComparisonReport, CurrentConditions, ForecastDay, ForecastResult, WeatherQuery};
pub use service::WeatherService;
pub use transport::{Endpoint, HttpTransport, RemoteResult, Transport};
pub use units::{UnitPair, UnitPolicy, Units};
