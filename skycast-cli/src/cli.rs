use anyhow::Context;
use clap::{Parser, Subcommand};
use skycast_core::{Config, Units, WeatherService, model::DEFAULT_FORECAST_DAYS};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather reports from WeatherAPI.com")]
pub struct Cli {
    /// Log requests and failures to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key in the config file.
    Configure,

    /// Print the location of the config file.
    ConfigPath,

    /// Show current conditions for a city.
    Current {
        city: String,

        /// "metric" for Celsius; any other value selects Fahrenheit.
        #[arg(long, default_value = "metric")]
        units: String,
    },

    /// Show a multi-day forecast (1-10 days).
    Forecast {
        city: String,

        /// Out-of-range values are clamped to 1..=10.
        #[arg(long, default_value_t = DEFAULT_FORECAST_DAYS, allow_negative_numbers = true)]
        days: i64,

        #[arg(long, default_value = "metric")]
        units: String,
    },

    /// Compare current conditions in two cities.
    Compare {
        city1: String,
        city2: String,

        #[arg(long, default_value = "metric")]
        units: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::ConfigPath => println!("{}", Config::config_file_path()?.display()),
            Command::Current { city, units } => {
                let service = service()?;
                println!("{}", service.current_weather(&city, Units::from(units.as_str())).await);
            }
            Command::Forecast { city, days, units } => {
                let service = service()?;
                println!("{}", service.forecast(&city, days, Units::from(units.as_str())).await);
            }
            Command::Compare { city1, city2, units } => {
                let service = service()?;
                let units = Units::from(units.as_str());
                println!("{}", service.compare_weather(&city1, &city2, units).await);
            }
        }

        Ok(())
    }
}

fn service() -> anyhow::Result<WeatherService<skycast_core::HttpTransport>> {
    let config = Config::load()?;
    tracing::debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "config loaded");

    WeatherService::from_config(&config).context("Failed to build HTTP client")
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_stored()?;

    let api_key = inquire::Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}
