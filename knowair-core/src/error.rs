use thiserror::Error;

/// Errors surfaced by weather tool calls.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Invalid coordinate: longitude {lng} must be within -180..180 and latitude {lat} within -90..90")]
    InvalidCoordinate { lng: f64, lat: f64 },

    #[error("Invalid parameter '{name}': {value} is outside the allowed range {min}..={max}")]
    InvalidParameter {
        name: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("API token not configured. Please set CAIYUN_WEATHER_API_TOKEN environment variable.")]
    MissingToken,

    #[error("Request timeout - please try again")]
    Timeout,

    #[error("Invalid API token - please check your CAIYUN_WEATHER_API_TOKEN")]
    Unauthorized,

    #[error("API rate limit exceeded - please try again later")]
    RateLimited,

    #[error("API request failed with status {0}")]
    Status(u16, String),

    #[error("Weather API returned an error: {0}")]
    Api(String),

    #[error("Weather data request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Failed to decode weather API response: {0}")]
    Decode(String),

    #[error("Weather API response contained no '{0}' data")]
    MissingSection(&'static str),
}

impl WeatherError {
    /// True for failures that happened talking to the upstream API, as opposed
    /// to local validation or configuration problems.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            WeatherError::Timeout
                | WeatherError::Unauthorized
                | WeatherError::RateLimited
                | WeatherError::Status(..)
                | WeatherError::Api(_)
                | WeatherError::Request(_)
                | WeatherError::Decode(_)
                | WeatherError::MissingSection(_)
        )
    }
}

/// The request URL carries the API token in its path, so it is stripped
/// before the error can reach a log line or a tool result.
impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        let e = e.without_url();
        if e.is_timeout() {
            WeatherError::Timeout
        } else if e.is_decode() {
            WeatherError::Decode(e.to_string())
        } else {
            WeatherError::Request(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
