use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::{config::Config, error::FetchError};

/// Result of a single call to the weather provider.
pub type RemoteResult = Result<serde_json::Value, FetchError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Current => "current.json",
            Endpoint::Forecast => "forecast.json",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Issues one GET against the provider. Implementations must not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        api_key: &str,
        params: Vec<(&'static str, String)>,
    ) -> RemoteResult;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    http: Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build().map_err(FetchError::from_reqwest)?;

        Ok(Self { base_url: base_url.into().trim_end_matches('/').to_string(), http })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        api_key: &str,
        params: Vec<(&'static str, String)>,
    ) -> RemoteResult {
        let url = format!("{}/{}", self.base_url, endpoint.path());
        tracing::debug!(%endpoint, ?params, "sending request to WeatherAPI");

        let res = self
            .http
            .get(&url)
            .query(&params)
            .query(&[("key", api_key)])
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(%endpoint, error = %err, "WeatherAPI request failed");
                FetchError::from_reqwest(err)
            })?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::from_reqwest)?;

        if !status.is_success() {
            tracing::warn!(%endpoint, status = status.as_u16(), "WeatherAPI returned an error status");
            return Err(FetchError::Status { code: status.as_u16(), body });
        }

        let value = serde_json::from_str(&body).map_err(|err| {
            tracing::warn!(%endpoint, error = %err, "WeatherAPI returned a non-JSON body");
            FetchError::from(err)
        })?;

        Ok(value)
    }
}
