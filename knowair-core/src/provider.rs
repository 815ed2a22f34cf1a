use async_trait::async_trait;
use std::{fmt, fmt::Debug, sync::Arc};

use crate::{
    Config,
    error::Result,
    model::{ApiResult, Coordinate, Lang},
};

pub mod caiyun;

pub use caiyun::CaiyunClient;

/// Upstream endpoints, appended to `{base}/{token}/{lng},{lat}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Realtime,
    Minutely,
    Hourly,
    Daily,
    Weather,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Realtime => "realtime",
            Endpoint::Minutely => "minutely",
            Endpoint::Hourly => "hourly",
            Endpoint::Daily => "daily",
            Endpoint::Weather => "weather",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One GET against the upstream API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub at: Coordinate,
    pub endpoint: Endpoint,
    pub params: Vec<(&'static str, String)>,
}

impl ApiRequest {
    fn new(at: Coordinate, endpoint: Endpoint, lang: Lang) -> Self {
        Self {
            at,
            endpoint,
            params: vec![("lang", lang.as_str().to_string())],
        }
    }

    fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    pub fn realtime(at: Coordinate, lang: Lang) -> Self {
        Self::new(at, Endpoint::Realtime, lang)
    }

    /// Hourly series of `steps` entries, starting at `begin` (unix seconds)
    /// when given, otherwise at the current hour.
    pub fn hourly(at: Coordinate, lang: Lang, steps: u32, begin: Option<i64>) -> Self {
        let req = Self::new(at, Endpoint::Hourly, lang).with("hourlysteps", steps);
        match begin {
            Some(ts) => req.with("begin", ts),
            None => req,
        }
    }

    pub fn daily(at: Coordinate, lang: Lang, steps: u32) -> Self {
        Self::new(at, Endpoint::Daily, lang).with("dailysteps", steps)
    }

    pub fn minutely(at: Coordinate, lang: Lang) -> Self {
        Self::new(at, Endpoint::Minutely, lang)
    }

    /// Combined realtime, today's daily, 24h hourly and alert sections.
    pub fn comprehensive(at: Coordinate, lang: Lang) -> Self {
        Self::new(at, Endpoint::Weather, lang)
            .with("dailysteps", 1)
            .with("hourlysteps", 24)
            .with("alert", true)
    }

    pub fn alerts(at: Coordinate, lang: Lang) -> Self {
        Self::new(at, Endpoint::Weather, lang).with("alert", true)
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    /// Perform the request and return the `result` object of a successful
    /// response.
    async fn fetch(&self, request: &ApiRequest) -> Result<ApiResult>;
}

/// Construct the HTTP-backed API from config.
pub fn api_from_config(config: &Config) -> Result<Arc<dyn WeatherApi>> {
    Ok(Arc::new(CaiyunClient::new(config.clone())?))
}
