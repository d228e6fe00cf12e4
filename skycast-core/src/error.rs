use thiserror::Error;

/// Every way a single request to the weather provider can fail.
///
/// Services never hand this to their callers; it is turned into report text by
/// [`crate::render::failure`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("WEATHER_API_KEY environment variable not set")]
    MissingCredential,

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("provider returned status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("unexpected response format: {0}")]
    Format(String),
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Format(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Format(err.to_string())
    }
}
