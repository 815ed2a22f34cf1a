use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::{
    Config,
    error::{Result, WeatherError},
    model::Coordinate,
    provider::{ApiRequest, WeatherApi, api_from_config},
    report::{self, DailySections, ReportStyle},
};

pub const DEFAULT_HOURLY_HOURS: u32 = 72;
pub const DEFAULT_DAILY_DAYS: u32 = 7;
pub const DEFAULT_HISTORY_HOURS: u32 = 24;

/// One operation per tool: validate, fetch once, format.
#[derive(Debug, Clone)]
pub struct WeatherService {
    api: Arc<dyn WeatherApi>,
    config: Config,
}

impl WeatherService {
    pub fn new(api: Arc<dyn WeatherApi>, config: Config) -> Self {
        Self { api, config }
    }

    /// Service backed by the Caiyun HTTP API.
    pub fn from_config(config: Config) -> Result<Self> {
        let api = api_from_config(&config)?;
        Ok(Self::new(api, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn style(&self) -> ReportStyle {
        ReportStyle::from_config(&self.config)
    }

    pub async fn realtime(&self, at: Coordinate, include_life_index: Option<bool>) -> Result<String> {
        tracing::info!(%at, "getting real-time weather");
        let result = self.api.fetch(&ApiRequest::realtime(at, self.config.lang)).await?;
        let rt = result.realtime.ok_or(WeatherError::MissingSection("realtime"))?;
        let include = include_life_index.unwrap_or(self.config.display.show_life_indices);
        Ok(report::realtime(&rt, self.style(), include))
    }

    pub async fn hourly_forecast(&self, at: Coordinate, hours: Option<u32>) -> Result<String> {
        let hours = check_range(
            "hours",
            hours.unwrap_or(DEFAULT_HOURLY_HOURS),
            self.config.limits.max_hourly_hours,
        )?;
        tracing::info!(%at, hours, "getting hourly forecast");

        let request = ApiRequest::hourly(at, self.config.lang, hours, None);
        let result = self.api.fetch(&request).await?;
        let hourly = result.hourly.ok_or(WeatherError::MissingSection("hourly"))?;
        Ok(report::hourly_forecast(&hourly, hours, self.style()))
    }

    pub async fn daily_forecast(
        &self,
        at: Coordinate,
        days: Option<u32>,
        include_life_index: Option<bool>,
        include_air_quality: Option<bool>,
    ) -> Result<String> {
        let days = check_range(
            "days",
            days.unwrap_or(DEFAULT_DAILY_DAYS),
            self.config.limits.max_daily_days,
        )?;
        tracing::info!(%at, days, "getting daily forecast");

        let result = self
            .api
            .fetch(&ApiRequest::daily(at, self.config.lang, days))
            .await?;
        let daily = result.daily.ok_or(WeatherError::MissingSection("daily"))?;
        let sections = DailySections {
            life_index: include_life_index.unwrap_or(false),
            air_quality: include_air_quality
                .unwrap_or(self.config.display.show_air_quality_trends),
        };
        Ok(report::daily_forecast(&daily, days, self.style(), sections))
    }

    pub async fn historical(&self, at: Coordinate, hours: Option<u32>) -> Result<String> {
        let hours = check_range(
            "hours",
            hours.unwrap_or(DEFAULT_HISTORY_HOURS),
            self.config.limits.max_history_hours,
        )?;
        let begin = (Utc::now() - Duration::hours(i64::from(hours))).timestamp();
        tracing::info!(%at, hours, begin, "getting historical weather");

        let request = ApiRequest::hourly(at, self.config.lang, hours, Some(begin));
        let result = self.api.fetch(&request).await?;
        let hourly = result.hourly.ok_or(WeatherError::MissingSection("hourly"))?;
        Ok(report::historical(&hourly, hours, self.style()))
    }

    /// Minute-level nowcast. Only offered for some regions, so upstream
    /// failures are reported as plain text instead of an error.
    pub async fn minute_precipitation(&self, at: Coordinate) -> Result<String> {
        tracing::info!(%at, "getting minute precipitation");
        match self.api.fetch(&ApiRequest::minutely(at, self.config.lang)).await {
            Ok(result) => Ok(match result.minutely {
                Some(minutely) => report::minute_precipitation(&minutely, self.style()),
                None => report::minutely_unavailable(at, None),
            }),
            Err(e) if e.is_upstream() => {
                tracing::warn!(%at, error = %e, "minute precipitation unavailable");
                Ok(report::minutely_unavailable(at, Some(&e.to_string())))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn comprehensive(&self, at: Coordinate) -> Result<String> {
        tracing::info!(%at, "getting comprehensive weather");
        let result = self
            .api
            .fetch(&ApiRequest::comprehensive(at, self.config.lang))
            .await?;
        Ok(report::comprehensive(&result, self.style()))
    }

    pub async fn astronomy(&self, at: Coordinate, days: Option<u32>) -> Result<String> {
        let days = check_range(
            "days",
            days.unwrap_or(DEFAULT_DAILY_DAYS),
            self.config.limits.max_daily_days,
        )?;
        tracing::info!(%at, days, "getting astronomy info");

        let result = self
            .api
            .fetch(&ApiRequest::daily(at, self.config.lang, days))
            .await?;
        let daily = result.daily.unwrap_or_default();
        Ok(report::astronomy(&daily, days, self.style()))
    }

    pub async fn alerts(&self, at: Coordinate) -> Result<String> {
        tracing::info!(%at, "getting weather alerts");
        let result = self
            .api
            .fetch(&ApiRequest::alerts(at, self.config.lang))
            .await?;
        Ok(report::alerts(result.alert.as_ref()))
    }
}

fn check_range(name: &'static str, value: u32, max: u32) -> Result<u32> {
    const MIN: u32 = 1;
    if (MIN..=max).contains(&value) {
        Ok(value)
    } else {
        Err(WeatherError::InvalidParameter {
            name,
            value,
            min: MIN,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{ApiEnvelope, ApiResult, Lang},
        provider::Endpoint,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves a canned result and records every request it sees.
    #[derive(Debug)]
    struct FakeApi {
        body: Option<&'static str>,
        error: Mutex<Option<WeatherError>>,
        seen: Mutex<Vec<ApiRequest>>,
    }

    impl FakeApi {
        fn serving(body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                body: Some(body),
                error: Mutex::new(None),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(error: WeatherError) -> Arc<Self> {
            Arc::new(Self {
                body: None,
                error: Mutex::new(Some(error)),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn last_request(&self) -> ApiRequest {
            self.seen.lock().unwrap().last().cloned().expect("a request was made")
        }

        fn request_count(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl WeatherApi for FakeApi {
        async fn fetch(&self, request: &ApiRequest) -> Result<ApiResult> {
            self.seen.lock().unwrap().push(request.clone());
            if let Some(err) = self.error.lock().unwrap().take() {
                return Err(err);
            }
            let envelope: ApiEnvelope =
                serde_json::from_str(self.body.unwrap_or("{\"status\":\"ok\",\"result\":{}}"))
                    .expect("fixture must parse");
            Ok(envelope.result.unwrap_or_default())
        }
    }

    const REALTIME: &str = include_str!("../tests/fixtures/realtime.json");
    const HOURLY: &str = include_str!("../tests/fixtures/hourly.json");
    const DAILY: &str = include_str!("../tests/fixtures/daily.json");
    const MINUTELY: &str = include_str!("../tests/fixtures/minutely.json");
    const WEATHER: &str = include_str!("../tests/fixtures/weather.json");

    fn service(api: Arc<FakeApi>) -> WeatherService {
        WeatherService::new(api, Config::default())
    }

    fn beijing() -> Coordinate {
        Coordinate::new(116.4074, 39.9042).unwrap()
    }

    #[tokio::test]
    async fn realtime_uses_configured_language_and_life_index_default() {
        let api = FakeApi::serving(REALTIME);
        let text = service(api.clone()).realtime(beijing(), None).await.unwrap();

        assert!(text.contains("Life Index:"));
        let req = api.last_request();
        assert_eq!(req.endpoint, Endpoint::Realtime);
        assert_eq!(req.param("lang"), Some("zh_CN"));
    }

    #[tokio::test]
    async fn realtime_can_skip_life_index() {
        let api = FakeApi::serving(REALTIME);
        let text = service(api).realtime(beijing(), Some(false)).await.unwrap();
        assert!(!text.contains("Life Index:"));
    }

    #[tokio::test]
    async fn realtime_without_section_is_an_error() {
        let api = FakeApi::serving(HOURLY);
        let err = service(api).realtime(beijing(), None).await.unwrap_err();
        assert!(matches!(err, WeatherError::MissingSection("realtime")));
    }

    #[tokio::test]
    async fn hourly_defaults_to_72_steps() {
        let api = FakeApi::serving(HOURLY);
        let text = service(api.clone()).hourly_forecast(beijing(), None).await.unwrap();

        assert!(text.starts_with("72-Hour Forecast:"));
        assert_eq!(api.last_request().param("hourlysteps"), Some("72"));
    }

    #[tokio::test]
    async fn hourly_rejects_out_of_range_hours_without_calling_api() {
        let api = FakeApi::serving(HOURLY);
        let svc = service(api.clone());

        for hours in [0, 361] {
            let err = svc.hourly_forecast(beijing(), Some(hours)).await.unwrap_err();
            assert!(matches!(err, WeatherError::InvalidParameter { name: "hours", .. }));
        }
        assert!(svc.hourly_forecast(beijing(), Some(360)).await.is_ok());
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn daily_forecast_passes_days_and_sections() {
        let api = FakeApi::serving(DAILY);
        let text = service(api.clone())
            .daily_forecast(beijing(), Some(2), Some(true), Some(false))
            .await
            .unwrap();

        assert!(text.starts_with("2-Day Forecast:"));
        assert!(text.contains("Life Index: UV 强"));
        assert!(!text.contains("AQI"));
        assert_eq!(api.last_request().param("dailysteps"), Some("2"));
    }

    #[tokio::test]
    async fn daily_forecast_rejects_too_many_days() {
        let api = FakeApi::serving(DAILY);
        let err = service(api)
            .daily_forecast(beijing(), Some(16), None, None)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'days': 16 is outside the allowed range 1..=15"
        );
    }

    #[tokio::test]
    async fn historical_requests_a_begin_timestamp_in_the_past() {
        let api = FakeApi::serving(HOURLY);
        let before = Utc::now().timestamp();
        let text = service(api.clone()).historical(beijing(), None).await.unwrap();

        assert!(text.starts_with("Past 24-Hour Weather:"));
        let req = api.last_request();
        assert_eq!(req.endpoint, Endpoint::Hourly);
        assert_eq!(req.param("hourlysteps"), Some("24"));
        let begin: i64 = req.param("begin").unwrap().parse().unwrap();
        let expected = before - 24 * 3600;
        assert!((begin - expected).abs() <= 5, "begin {begin} expected ~{expected}");
    }

    #[tokio::test]
    async fn historical_caps_hours() {
        let api = FakeApi::serving(HOURLY);
        let err = service(api).historical(beijing(), Some(73)).await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidParameter { max: 72, .. }));
    }

    #[tokio::test]
    async fn minute_precipitation_formats_series() {
        let api = FakeApi::serving(MINUTELY);
        let text = service(api).minute_precipitation(beijing()).await.unwrap();
        assert!(text.contains("T+10min: 0.50mm/h"));
    }

    #[tokio::test]
    async fn minute_precipitation_degrades_on_upstream_failure() {
        let api = FakeApi::failing(WeatherError::Status(404, String::new()));
        let text = service(api).minute_precipitation(beijing()).await.unwrap();
        assert!(text.starts_with("Minute-level precipitation data not available"));
        assert!(text.contains("status 404"));
    }

    #[tokio::test]
    async fn minute_precipitation_without_section() {
        let api = FakeApi::serving(REALTIME);
        let text = service(api).minute_precipitation(beijing()).await.unwrap();
        assert!(text.starts_with("Minute-level precipitation data not available"));
        assert!(!text.contains("Error:"));
    }

    #[tokio::test]
    async fn minute_precipitation_still_reports_missing_token() {
        let api = FakeApi::failing(WeatherError::MissingToken);
        let err = service(api).minute_precipitation(beijing()).await.unwrap_err();
        assert!(matches!(err, WeatherError::MissingToken));
    }

    #[tokio::test]
    async fn comprehensive_requests_alerts() {
        let api = FakeApi::serving(WEATHER);
        let text = service(api.clone()).comprehensive(beijing()).await.unwrap();

        assert!(text.contains("Active Weather Alerts: 2"));
        let req = api.last_request();
        assert_eq!(req.endpoint, Endpoint::Weather);
        assert_eq!(req.param("alert"), Some("true"));
    }

    #[tokio::test]
    async fn astronomy_tolerates_missing_daily() {
        let api = FakeApi::serving(REALTIME);
        let text = service(api).astronomy(beijing(), None).await.unwrap();
        assert_eq!(text, "Astronomy data not available for this location.");
    }

    #[tokio::test]
    async fn alerts_in_english_config() {
        let api = FakeApi::serving(WEATHER);
        let config = Config {
            lang: Lang::EnUs,
            ..Config::default()
        };
        let svc = WeatherService::new(api.clone(), config);
        let text = svc.alerts(beijing()).await.unwrap();

        assert!(text.starts_with("Weather Alerts:"));
        assert_eq!(api.last_request().param("lang"), Some("en_US"));
    }

    #[tokio::test]
    async fn upstream_errors_propagate() {
        let api = FakeApi::failing(WeatherError::RateLimited);
        let err = service(api).alerts(beijing()).await.unwrap_err();
        assert_eq!(err.to_string(), "API rate limit exceeded - please try again later");
    }

    #[test]
    fn check_range_bounds() {
        assert_eq!(check_range("days", 1, 15).unwrap(), 1);
        assert_eq!(check_range("days", 15, 15).unwrap(), 15);
        assert!(check_range("days", 0, 15).is_err());
        assert!(check_range("days", 16, 15).is_err());
    }
}
