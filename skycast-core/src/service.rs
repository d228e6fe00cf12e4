use crate::{
    config::Config,
    error::FetchError,
    model::{ComparisonReport, CurrentConditions, ForecastResult, WeatherQuery, clamp_days},
    render::{self, Operation},
    transport::{Endpoint, HttpTransport, Transport},
    units::Units,
    weatherapi,
};

/// Current conditions, forecasts and comparisons as ready-to-print text.
///
/// The text-returning operations never fail: every error is rendered into the
/// returned string.
#[derive(Debug, Clone)]
pub struct WeatherService<T: Transport> {
    api_key: Option<String>,
    transport: T,
}

impl WeatherService<HttpTransport> {
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Ok(Self::new(config, HttpTransport::from_config(config)?))
    }
}

impl<T: Transport> WeatherService<T> {
    pub fn new(config: &Config, transport: T) -> Self {
        Self { api_key: config.api_key().map(str::to_owned), transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn api_key(&self) -> Result<&str, FetchError> {
        self.api_key.as_deref().ok_or(FetchError::MissingCredential)
    }

    pub async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, FetchError> {
        let key = self.api_key()?;
        let value =
            self.transport.fetch(Endpoint::Current, key, vec![("q", city.to_string())]).await?;
        weatherapi::parse_current(value)
    }

    /// `days` is clamped to 1..=10 before the request is made.
    pub async fn fetch_forecast(&self, city: &str, days: i64) -> Result<ForecastResult, FetchError> {
        let days = clamp_days(days);
        let key = self.api_key()?;
        let params = vec![("q", city.to_string()), ("days", days.to_string())];
        let value = self.transport.fetch(Endpoint::Forecast, key, params).await?;
        weatherapi::parse_forecast(city, days, value)
    }

    pub async fn current_weather(&self, city: &str, units: Units) -> String {
        let query = WeatherQuery::current(city, units);
        match self.fetch_current(&query.city).await {
            Ok(cc) => render::current_report(&cc, query.units),
            Err(err) => {
                tracing::warn!(city = %query.city, error = %err, "current weather unavailable");
                render::failure(Operation::CurrentWeather, &err)
            }
        }
    }

    /// Both unit systems are always shown; `units` does not change the report.
    pub async fn forecast(&self, city: &str, days: i64, units: Units) -> String {
        let query = WeatherQuery::forecast(city, days, units);
        tracing::debug!(
            city = %query.city,
            days = ?query.days,
            units = %query.units,
            "forecast requested"
        );

        match self.fetch_forecast(&query.city, days).await {
            Ok(result) => {
                if result.is_partial() {
                    tracing::info!(
                        city,
                        requested = result.requested,
                        available = result.available(),
                        "provider returned a shorter forecast than requested"
                    );
                }
                render::forecast_report(&result)
            }
            Err(err) => {
                tracing::warn!(city, error = %err, "forecast unavailable");
                render::failure(Operation::Forecast, &err)
            }
        }
    }

    /// Both cities are fetched concurrently; `city1` always comes first.
    pub async fn compare_weather(&self, city1: &str, city2: &str, units: Units) -> String {
        let (first, second) =
            tokio::join!(self.current_weather(city1, units), self.current_weather(city2, units));

        render::comparison_report(&ComparisonReport { first, second })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{MockTransport, RemoteResult};
    use crate::weatherapi::fixtures::{current_json, forecast_json};

    const MISSING_KEY: &str = "Error: WEATHER_API_KEY environment variable not set";

    fn service(transport: MockTransport) -> WeatherService<MockTransport> {
        WeatherService::new(&Config::with_api_key("TEST_KEY"), transport)
    }

    fn param<'a>(params: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| *k == name).map(|(_, v)| v.as_str())
    }

    fn forecast_body(n: usize) -> serde_json::Value {
        let dates: Vec<String> = (1..=n).map(|d| format!("2025-06-{d:02}")).collect();
        let refs: Vec<&str> = dates.iter().map(String::as_str).collect();
        forecast_json(&refs)
    }

    fn answering_forecast(n: usize) -> MockTransport {
        let body = forecast_body(n);
        let mut transport = MockTransport::new();
        transport
            .expect_fetch()
            .times(1)
            .returning(move |_, _, _| Ok(body.clone()));
        transport
    }

    fn answering_city(transport: &mut MockTransport, city: &'static str, result: RemoteResult) {
        transport
            .expect_fetch()
            .withf(move |endpoint, _, params| {
                *endpoint == Endpoint::Current && param(params, "q") == Some(city)
            })
            .times(1)
            .returning(move |_, _, _| result.clone());
    }

    #[tokio::test]
    async fn current_weather_imperial_uses_fahrenheit_and_kph() {
        let mut transport = MockTransport::new();
        transport
            .expect_fetch()
            .withf(|endpoint, key, params| {
                *endpoint == Endpoint::Current
                    && key == "TEST_KEY"
                    && param(params, "q") == Some("London")
            })
            .times(1)
            .returning(|_, _, _| Ok(current_json("London", "United Kingdom")));

        let text = service(transport).current_weather("London", Units::Imperial).await;

        assert!(text.contains("Temperature: 59°F"));
        assert!(text.contains("Feels Like: 56.3°F"));
        assert!(text.contains("Wind Speed: 14.4 kph"));
        assert!(!text.contains("mph"));
    }

    #[tokio::test]
    async fn selector_other_than_exact_metric_renders_fahrenheit() {
        for selector in ["METRIC", " metric ", "Metric"] {
            let mut transport = MockTransport::new();
            transport
                .expect_fetch()
                .times(1)
                .returning(|_, _, _| Ok(current_json("London", "United Kingdom")));

            let text = service(transport).current_weather("London", Units::from(selector)).await;
            assert!(text.contains("Temperature: 59°F"), "selector {selector:?}");
        }
    }

    #[tokio::test]
    async fn missing_key_makes_no_remote_call() {
        let mut transport = MockTransport::new();
        transport.expect_fetch().times(0);
        let svc = WeatherService::new(&Config::default(), transport);

        assert_eq!(svc.current_weather("London", Units::Metric).await, MISSING_KEY);
        assert_eq!(svc.forecast("London", 3, Units::Metric).await, MISSING_KEY);
        assert!(svc.compare_weather("Paris", "Tokyo", Units::Metric).await.contains(MISSING_KEY));
    }

    #[tokio::test]
    async fn missing_visibility_renders_na() {
        let mut body = current_json("London", "United Kingdom");
        body["current"].as_object_mut().unwrap().remove("vis_km");

        let mut transport = MockTransport::new();
        transport.expect_fetch().times(1).returning(move |_, _, _| Ok(body.clone()));

        let text = service(transport).current_weather("London", Units::Metric).await;
        assert!(text.contains("Visibility: N/A"));
    }

    #[tokio::test]
    async fn status_failure_embeds_code_and_body() {
        let mut transport = MockTransport::new();
        transport.expect_fetch().times(2).returning(|_, _, _| {
            Err(FetchError::Status {
                code: 404,
                body: "{\"error\":{\"code\":1006,\"message\":\"No matching location found.\"}}"
                    .into(),
            })
        });
        let svc = service(transport);

        for text in [
            svc.current_weather("Atlantis", Units::Metric).await,
            svc.forecast("Atlantis", 3, Units::Metric).await,
        ] {
            assert!(text.starts_with("HTTP Error: 404 - "));
            assert!(text.contains("No matching location found."));
        }
    }

    #[tokio::test]
    async fn other_failures_name_the_operation() {
        let mut transport = MockTransport::new();
        transport.expect_fetch().times(2).returning(|_, _, _| Err(FetchError::Timeout));
        let svc = service(transport);

        assert_eq!(
            svc.current_weather("London", Units::Metric).await,
            "Error fetching weather: request timed out"
        );
        assert_eq!(
            svc.forecast("London", 3, Units::Metric).await,
            "Error fetching forecast: request timed out"
        );
    }

    #[tokio::test]
    async fn malformed_payload_is_rendered_not_raised() {
        let mut transport = MockTransport::new();
        transport
            .expect_fetch()
            .returning(|_, _, _| Ok(serde_json::json!({ "unexpected": true })));

        let text = service(transport).current_weather("London", Units::Metric).await;
        assert!(text.starts_with("Error fetching weather: unexpected response format"));
    }

    #[tokio::test]
    async fn forecast_days_are_clamped_before_the_request() {
        for (requested, sent) in [(-5, "1"), (0, "1"), (1, "1"), (7, "7"), (10, "10"), (99, "10")] {
            let body = forecast_body(1);
            let mut transport = MockTransport::new();
            transport
                .expect_fetch()
                .withf(move |endpoint, _, params| {
                    *endpoint == Endpoint::Forecast
                        && param(params, "q") == Some("London")
                        && param(params, "days") == Some(sent)
                        && param(params, "units").is_none()
                })
                .times(1)
                .returning(move |_, _, _| Ok(body.clone()));

            let text = service(transport).forecast("London", requested, Units::Imperial).await;
            assert!(text.contains(&format!("(requested {sent} days)")), "days={requested}");
        }
    }

    #[tokio::test]
    async fn shortfall_warning_only_when_provider_returns_fewer_days() {
        let text = service(answering_forecast(3)).forecast("London", 7, Units::Metric).await;
        assert!(text.contains("(requested 7 days)"));
        assert!(text.contains("Only 3 days available"));
        assert_eq!(text.matches("📅").count(), 3);

        let text = service(answering_forecast(3)).forecast("London", 3, Units::Metric).await;
        assert!(!text.contains("Only"));
    }

    #[tokio::test]
    async fn forecast_ignores_units_selector() {
        let metric = service(answering_forecast(2)).forecast("London", 2, Units::Metric).await;
        let imperial = service(answering_forecast(2)).forecast("London", 2, Units::Imperial).await;

        assert_eq!(metric, imperial);
        assert!(metric.contains("21.3°C / 70.3°F"));
    }

    #[tokio::test]
    async fn comparison_orders_reports_and_matches_single_calls() {
        let transport = || {
            let mut transport = MockTransport::new();
            answering_city(&mut transport, "Paris", Ok(current_json("Paris", "France")));
            answering_city(&mut transport, "Tokyo", Ok(current_json("Tokyo", "Japan")));
            transport
        };

        let text = service(transport()).compare_weather("Paris", "Tokyo", Units::Metric).await;

        let single = service(transport());
        let paris = single.current_weather("Paris", Units::Metric).await;
        let tokyo = single.current_weather("Tokyo", Units::Metric).await;

        let paris_at = text.find(paris.trim_end()).expect("Paris report present");
        let tokyo_at = text.find(tokyo.trim_end()).expect("Tokyo report present");
        assert!(paris_at < tokyo_at);
        assert!(text.starts_with("Weather Comparison\n"));
        assert_eq!(text.matches(&"=".repeat(60)).count(), 3);
    }

    #[tokio::test]
    async fn comparison_embeds_inner_failures() {
        let mut transport = MockTransport::new();
        answering_city(&mut transport, "Paris", Ok(current_json("Paris", "France")));
        answering_city(
            &mut transport,
            "Nowhere",
            Err(FetchError::Status { code: 400, body: "bad q".into() }),
        );

        let text = service(transport).compare_weather("Nowhere", "Paris", Units::Metric).await;
        let err_at = text.find("HTTP Error: 400 - bad q").unwrap();
        let paris_at = text.find("Current Weather in Paris, France").unwrap();
        assert!(err_at < paris_at);
    }
}
