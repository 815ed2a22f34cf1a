use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{Result, WeatherError};

/// A validated longitude/latitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lng: f64,
    lat: f64,
}

impl Coordinate {
    pub fn new(lng: f64, lat: f64) -> Result<Self> {
        let lng_ok = lng.is_finite() && (-180.0..=180.0).contains(&lng);
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        if !(lng_ok && lat_ok) {
            return Err(WeatherError::InvalidCoordinate { lng, lat });
        }
        Ok(Self { lng, lat })
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }
}

/// Upstream path segment, `lng,lat`.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

/// Output language for the upstream API and the classification tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lang {
    #[default]
    #[serde(rename = "zh_CN")]
    ZhCn,
    #[serde(rename = "en_US")]
    EnUs,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::ZhCn => "zh_CN",
            Lang::EnUs => "en_US",
        }
    }

    pub const fn all() -> &'static [Lang] {
        &[Lang::ZhCn, Lang::EnUs]
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Lang {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        match value.replace('-', "_").to_lowercase().as_str() {
            "zh_cn" | "zh" => Ok(Lang::ZhCn),
            "en_us" | "en" => Ok(Lang::EnUs),
            _ => Err(anyhow::anyhow!(
                "Unknown language '{value}'. Supported languages: zh_CN, en_US."
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Upstream response shapes (Caiyun v2.6)
// ---------------------------------------------------------------------------

/// Top-level response body. `result` is absent when `status` is not "ok".
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub result: Option<ApiResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResult {
    #[serde(default)]
    pub realtime: Option<Realtime>,
    #[serde(default)]
    pub minutely: Option<Minutely>,
    #[serde(default)]
    pub hourly: Option<Hourly>,
    #[serde(default)]
    pub daily: Option<Daily>,
    #[serde(default)]
    pub alert: Option<AlertSection>,
    #[serde(default)]
    pub forecast_keypoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Realtime {
    pub temperature: f64,
    #[serde(default)]
    pub apparent_temperature: Option<f64>,
    pub humidity: f64,
    #[serde(default)]
    pub cloudrate: Option<f64>,
    pub skycon: String,
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub dswrf: Option<f64>,
    pub wind: Wind,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub precipitation: Option<RealtimePrecipitation>,
    #[serde(default)]
    pub air_quality: Option<AirQuality>,
    #[serde(default)]
    pub life_index: Option<RealtimeLifeIndex>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub direction: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RealtimePrecipitation {
    #[serde(default)]
    pub local: Option<LocalPrecipitation>,
    #[serde(default)]
    pub nearest: Option<NearestPrecipitation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalPrecipitation {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub datasource: Option<String>,
    pub intensity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NearestPrecipitation {
    #[serde(default)]
    pub status: Option<String>,
    pub distance: f64,
    pub intensity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirQuality {
    pub pm25: f64,
    pub pm10: f64,
    pub o3: f64,
    pub so2: f64,
    pub no2: f64,
    pub co: f64,
    pub aqi: AqiPair,
    #[serde(default)]
    pub description: Option<AqiDescription>,
}

/// AQI on the Chinese and US scales.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AqiPair {
    pub chn: f64,
    pub usa: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AqiDescription {
    #[serde(default)]
    pub chn: Option<String>,
    #[serde(default)]
    pub usa: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RealtimeLifeIndex {
    #[serde(default)]
    pub ultraviolet: Option<IndexReading>,
    #[serde(default)]
    pub comfort: Option<IndexReading>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexReading {
    #[serde(default, deserialize_with = "de_level")]
    pub index: Option<i64>,
    #[serde(default)]
    pub desc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Minutely {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub datasource: Option<String>,
    #[serde(default)]
    pub precipitation_2h: Vec<f64>,
    #[serde(default)]
    pub precipitation: Vec<f64>,
    #[serde(default)]
    pub probability: Vec<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hourly {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub precipitation: Vec<HourlyPrecipitation>,
    #[serde(default)]
    pub temperature: Vec<HourlyValue>,
    #[serde(default)]
    pub apparent_temperature: Vec<HourlyValue>,
    #[serde(default)]
    pub wind: Vec<HourlyWind>,
    #[serde(default)]
    pub humidity: Vec<HourlyValue>,
    #[serde(default)]
    pub skycon: Vec<TimedSkycon>,
    #[serde(default)]
    pub air_quality: Option<HourlyAirQuality>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyValue {
    pub datetime: String,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyPrecipitation {
    pub datetime: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub probability: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyWind {
    pub datetime: String,
    pub speed: f64,
    pub direction: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimedSkycon {
    #[serde(alias = "date")]
    pub datetime: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyAirQuality {
    #[serde(default)]
    pub aqi: Vec<HourlyAqi>,
    #[serde(default)]
    pub pm25: Vec<HourlyValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyAqi {
    pub datetime: String,
    pub value: AqiPair,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Daily {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub astro: Vec<Astro>,
    #[serde(default)]
    pub precipitation: Vec<DailyRange>,
    #[serde(default)]
    pub temperature: Vec<DailyRange>,
    #[serde(default)]
    pub skycon: Vec<TimedSkycon>,
    #[serde(default)]
    pub air_quality: Option<DailyAirQuality>,
    #[serde(default)]
    pub life_index: Option<DailyLifeIndex>,
}

/// Daily aggregate of a numeric series.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyRange {
    pub date: String,
    pub max: f64,
    pub min: f64,
    pub avg: f64,
    #[serde(default)]
    pub probability: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Astro {
    pub date: String,
    #[serde(default)]
    pub sunrise: Option<AstroTime>,
    #[serde(default)]
    pub sunset: Option<AstroTime>,
    #[serde(default)]
    pub moonrise: Option<AstroTime>,
    #[serde(default)]
    pub moonset: Option<AstroTime>,
    #[serde(default)]
    pub moon_phase: Option<String>,
}

/// Rise/set times come either as `{"time": "06:12"}` or as a bare string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AstroTime {
    Detailed { time: String },
    Plain(String),
}

impl AstroTime {
    pub fn time(&self) -> &str {
        match self {
            AstroTime::Detailed { time } => time,
            AstroTime::Plain(time) => time,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyAirQuality {
    #[serde(default)]
    pub aqi: Vec<DailyAqi>,
    #[serde(default)]
    pub pm25: Vec<DailyRange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyAqi {
    pub date: String,
    pub max: AqiPair,
    pub avg: AqiPair,
    pub min: AqiPair,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyLifeIndex {
    #[serde(default)]
    pub ultraviolet: Vec<DailyIndex>,
    #[serde(default, rename = "carWashing")]
    pub car_washing: Vec<DailyIndex>,
    #[serde(default)]
    pub dressing: Vec<DailyIndex>,
    #[serde(default)]
    pub comfort: Vec<DailyIndex>,
    #[serde(default, rename = "coldRisk")]
    pub cold_risk: Vec<DailyIndex>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyIndex {
    pub date: String,
    #[serde(default, deserialize_with = "de_level")]
    pub index: Option<i64>,
    #[serde(default)]
    pub desc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertSection {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub content: Vec<Alert>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub pubtimestamp: Option<i64>,
}

/// Index levels arrive as integers, floats or numeric strings depending on
/// the endpoint.
fn de_level<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| s.trim().parse::<f64>().ok().map(|f| f.round() as i64)),
        _ => None,
    }))
}
