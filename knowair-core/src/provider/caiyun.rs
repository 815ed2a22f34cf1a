use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::{
    Config,
    error::{Result, WeatherError},
    model::{ApiEnvelope, ApiResult},
};

use super::{ApiRequest, WeatherApi};

/// HTTP client for the Caiyun v2.6 REST API.
#[derive(Debug, Clone)]
pub struct CaiyunClient {
    config: Config,
    http: Client,
}

impl CaiyunClient {
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl WeatherApi for CaiyunClient {
    async fn fetch(&self, request: &ApiRequest) -> Result<ApiResult> {
        let token = self.config.validate_token()?;
        let url = self.config.api_url(token, request.at, request.endpoint);

        tracing::debug!(
            endpoint = %request.endpoint,
            at = %request.at,
            params = ?request.params,
            "requesting weather data"
        );

        let res = self
            .http
            .get(&url)
            .query(&request.params)
            .send()
            .await
            .map_err(|e| {
                let e = WeatherError::from(e);
                tracing::error!(endpoint = %request.endpoint, error = %e, "request failed");
                e
            })?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::error!(
                endpoint = %request.endpoint,
                status = status.as_u16(),
                body = %truncate_body(&body),
                "weather API returned an error status"
            );
            return Err(status_error(status, &body));
        }

        parse_body(&body)
    }
}

fn status_error(status: StatusCode, body: &str) -> WeatherError {
    match status {
        StatusCode::UNAUTHORIZED => WeatherError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimited,
        other => WeatherError::Status(other.as_u16(), truncate_body(body)),
    }
}

/// Decode a 2xx body, rejecting envelopes whose `status` is not "ok".
fn parse_body(body: &str) -> Result<ApiResult> {
    let envelope: ApiEnvelope = serde_json::from_str(body)
        .map_err(|e| WeatherError::Decode(format!("{e}: {}", truncate_body(body))))?;

    if envelope.status != "ok" {
        let message = envelope
            .error
            .unwrap_or_else(|| format!("status '{}'", envelope.status));
        return Err(WeatherError::Api(message));
    }

    envelope.result.ok_or(WeatherError::MissingSection("result"))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
