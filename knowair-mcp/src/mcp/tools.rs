//! MCP tool definitions and handlers
//!
//! Every tool takes `lng`/`lat` plus a few optional knobs, runs one
//! [`WeatherService`] operation and returns its report as text.

use serde::Deserialize;
use serde_json::{Map, Value, json};

use knowair_core::{
    Coordinate, Limits, WeatherError, WeatherService,
    service::{DEFAULT_DAILY_DAYS, DEFAULT_HISTORY_HOURS, DEFAULT_HOURLY_HOURS},
};

use super::types::{ToolDefinition, ToolResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Realtime,
    Hourly,
    Weekly,
    Historical,
    MinutePrecipitation,
    Comprehensive,
    Astronomy,
    Alerts,
}

impl Tool {
    pub const ALL: [Tool; 8] = [
        Tool::Realtime,
        Tool::Hourly,
        Tool::Weekly,
        Tool::Historical,
        Tool::MinutePrecipitation,
        Tool::Comprehensive,
        Tool::Astronomy,
        Tool::Alerts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Realtime => "get_realtime_weather",
            Tool::Hourly => "get_hourly_forecast",
            Tool::Weekly => "get_weekly_forecast",
            Tool::Historical => "get_historical_weather",
            Tool::MinutePrecipitation => "get_minute_precipitation",
            Tool::Comprehensive => "get_comprehensive_weather",
            Tool::Astronomy => "get_astronomy_info",
            Tool::Alerts => "get_weather_alerts",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    fn description(self) -> &'static str {
        match self {
            Tool::Realtime => {
                "Get comprehensive real-time weather data including temperature, humidity, wind, air quality, and life indices."
            }
            Tool::Hourly => {
                "Get detailed hourly weather forecast (up to 360 hours, default 72) including temperature, apparent temperature, weather conditions, precipitation and wind data."
            }
            Tool::Weekly => {
                "Get daily weather forecast (up to 15 days, default 7) including temperature range, weather conditions and precipitation probability."
            }
            Tool::Historical => {
                "Get historical hourly weather data for the past hours (default 24, up to 72) including temperature and weather conditions."
            }
            Tool::MinutePrecipitation => {
                "Get minute-level precipitation forecast for the next 2 hours (available for major cities in China)."
            }
            Tool::Comprehensive => {
                "Get comprehensive weather report including current conditions, air quality, today's forecast, and active alerts."
            }
            Tool::Astronomy => {
                "Get astronomy information including sunrise, sunset times and moon phase for the next days (default 7)."
            }
            Tool::Alerts => "Get active weather alerts and warnings for the specified location.",
        }
    }

    /// Used in failure messages: "Failed to get {action}: ...".
    pub fn action(self) -> &'static str {
        match self {
            Tool::Realtime => "real-time weather",
            Tool::Hourly => "hourly forecast",
            Tool::Weekly => "weekly forecast",
            Tool::Historical => "historical weather",
            Tool::MinutePrecipitation => "minute precipitation",
            Tool::Comprehensive => "comprehensive weather",
            Tool::Astronomy => "astronomy info",
            Tool::Alerts => "weather alerts",
        }
    }

    fn input_schema(self, limits: &Limits) -> Value {
        let mut properties = Map::new();
        properties.insert(
            "lng".into(),
            json!({
                "type": "number",
                "description": "The longitude of the location (-180 to 180)",
                "minimum": -180.0,
                "maximum": 180.0
            }),
        );
        properties.insert(
            "lat".into(),
            json!({
                "type": "number",
                "description": "The latitude of the location (-90 to 90)",
                "minimum": -90.0,
                "maximum": 90.0
            }),
        );

        match self {
            Tool::Realtime => {
                properties.insert(
                    "include_life_index".into(),
                    flag("Include ultraviolet and comfort indices"),
                );
            }
            Tool::Hourly => {
                properties.insert(
                    "hours".into(),
                    count("Number of hours to forecast", DEFAULT_HOURLY_HOURS, limits.max_hourly_hours),
                );
            }
            Tool::Weekly => {
                properties.insert(
                    "days".into(),
                    count("Number of days to forecast", DEFAULT_DAILY_DAYS, limits.max_daily_days),
                );
                properties.insert(
                    "include_life_index".into(),
                    flag("Include daily life indices"),
                );
                properties.insert(
                    "include_air_quality".into(),
                    flag("Include daily AQI and PM2.5 trends"),
                );
            }
            Tool::Historical => {
                properties.insert(
                    "hours".into(),
                    count("Number of past hours", DEFAULT_HISTORY_HOURS, limits.max_history_hours),
                );
            }
            Tool::Astronomy => {
                properties.insert(
                    "days".into(),
                    count("Number of days", DEFAULT_DAILY_DAYS, limits.max_daily_days),
                );
            }
            Tool::MinutePrecipitation | Tool::Comprehensive | Tool::Alerts => {}
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": ["lng", "lat"]
        })
    }

    fn definition(self, limits: &Limits) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(limits),
        }
    }
}

fn count(description: &str, default: u32, max: u32) -> Value {
    json!({
        "type": "integer",
        "description": format!("{description} (1-{max}, default {default})"),
        "minimum": 1,
        "maximum": max,
        "default": default
    })
}

fn flag(description: &str) -> Value {
    json!({ "type": "boolean", "description": description })
}

/// Return all tool definitions for tools/list
pub fn list_tools(limits: &Limits) -> Vec<ToolDefinition> {
    Tool::ALL.iter().map(|t| t.definition(limits)).collect()
}

/// Arguments shared by all tools. Knobs a tool doesn't use are ignored.
#[derive(Debug, Deserialize)]
struct ToolArgs {
    lng: f64,
    lat: f64,
    #[serde(default)]
    hours: Option<u32>,
    #[serde(default)]
    days: Option<u32>,
    #[serde(default)]
    include_life_index: Option<bool>,
    #[serde(default)]
    include_air_quality: Option<bool>,
}

/// Dispatch a tool call by name
pub async fn call_tool(service: &WeatherService, name: &str, args: &Value) -> ToolResult {
    let Some(tool) = Tool::from_name(name) else {
        return ToolResult::error(format!("Unknown tool: {name}"));
    };

    let args: ToolArgs = match serde_json::from_value(args.clone()) {
        Ok(a) => a,
        Err(e) => {
            return ToolResult::error(format!("Invalid arguments for {name}: {e}"));
        }
    };

    match run(service, tool, &args).await {
        Ok(text) => ToolResult::text(text),
        Err(e) => {
            tracing::error!(tool = name, error = %e, "tool call failed");
            ToolResult::error(format!("Failed to get {}: {e}", tool.action()))
        }
    }
}

async fn run(service: &WeatherService, tool: Tool, args: &ToolArgs) -> Result<String, WeatherError> {
    let at = Coordinate::new(args.lng, args.lat)?;
    match tool {
        Tool::Realtime => service.realtime(at, args.include_life_index).await,
        Tool::Hourly => service.hourly_forecast(at, args.hours).await,
        Tool::Weekly => {
            service
                .daily_forecast(at, args.days, args.include_life_index, args.include_air_quality)
                .await
        }
        Tool::Historical => service.historical(at, args.hours).await,
        Tool::MinutePrecipitation => service.minute_precipitation(at).await,
        Tool::Comprehensive => service.comprehensive(at).await,
        Tool::Astronomy => service.astronomy(at, args.days).await,
        Tool::Alerts => service.alerts(at).await,
    }
}
