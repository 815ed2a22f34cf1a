//! Human-readable reports built from upstream response sections.
//!
//! Every function here is pure: the same response and style always produce
//! the same text. Labels are English; translated values (weather phenomena,
//! bands, life indices) follow [`ReportStyle::lang`].

use chrono::{DateTime, Utc};

use crate::{
    Config,
    model::{
        AirQuality, AlertSection, ApiResult, Coordinate, Daily, DailyIndex, Hourly, Lang,
        Minutely, Realtime,
    },
    translate::{
        AqiLevel, LifeIndexKind, Pm25Level, PrecipitationScale, format_precipitation, moon_phase,
        moon_phase_icon, skycon,
    },
};

const SEPARATOR: &str = "------------------------";

/// Number of alerts listed in the comprehensive report.
const COMPREHENSIVE_ALERT_LIMIT: usize = 3;

/// Entries of the 2h minute series shown, one every N minutes.
const MINUTELY_STEP: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStyle {
    pub lang: Lang,
    pub use_emoji: bool,
}

impl ReportStyle {
    pub fn from_config(config: &Config) -> Self {
        Self {
            lang: config.lang,
            use_emoji: config.display.use_emoji,
        }
    }

    fn heading(&self, emoji: &str, text: &str) -> String {
        if self.use_emoji {
            format!("{emoji} {text}")
        } else {
            text.to_string()
        }
    }

    fn band(&self, label: &str, icon: &str) -> String {
        if self.use_emoji {
            format!("{label} {icon}")
        } else {
            label.to_string()
        }
    }
}

/// Optional sections of the daily forecast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailySections {
    pub life_index: bool,
    pub air_quality: bool,
}

pub fn realtime(rt: &Realtime, style: ReportStyle, include_life_index: bool) -> String {
    let lang = style.lang;
    let mut lines = vec![
        format!("Weather: {}", skycon(&rt.skycon, lang)),
        format!("Temperature: {:.1}°C", rt.temperature),
    ];
    if let Some(apparent) = rt.apparent_temperature {
        lines.push(format!("Feels Like: {apparent:.1}°C"));
    }
    lines.push(format!("Humidity: {}", percent(rt.humidity)));
    lines.push(format!(
        "Wind: {:.1} m/s, from {:.0}° (clockwise from north)",
        rt.wind.speed, rt.wind.direction
    ));

    if let Some(precipitation) = &rt.precipitation {
        if let Some(local) = &precipitation.local {
            lines.push(format!(
                "Precipitation: {}",
                format_precipitation(local.intensity, PrecipitationScale::Radar, lang)
            ));
        }
        if let Some(nearest) = &precipitation.nearest {
            let reported = nearest.status.as_deref().is_none_or(|s| s == "ok");
            if reported && nearest.intensity > 0.0 {
                lines.push(format!(
                    "Nearest Precipitation: {:.1} km away, {}",
                    nearest.distance,
                    format_precipitation(nearest.intensity, PrecipitationScale::Radar, lang)
                ));
            }
        }
    }

    if let Some(aq) = &rt.air_quality {
        lines.extend(air_quality_block(aq, style));
    }

    if include_life_index {
        if let Some(life) = &rt.life_index {
            let readings = [
                ("UV", LifeIndexKind::Ultraviolet, &life.ultraviolet),
                ("Comfort", LifeIndexKind::Comfort, &life.comfort),
            ];
            let described: Vec<String> = readings
                .iter()
                .filter_map(|(label, kind, reading)| {
                    let reading = reading.as_ref()?;
                    let text = match (&reading.desc, reading.index) {
                        (Some(desc), _) if !desc.is_empty() => desc.clone(),
                        (_, Some(level)) => kind.describe(level, lang),
                        _ => return None,
                    };
                    Some(format!("    {label}: {text}"))
                })
                .collect();
            if !described.is_empty() {
                lines.push("Life Index:".to_string());
                lines.extend(described);
            }
        }
    }

    lines.join("\n")
}

fn air_quality_block(aq: &AirQuality, style: ReportStyle) -> Vec<String> {
    let lang = style.lang;
    let pm25 = Pm25Level::from_concentration(aq.pm25);
    let aqi = AqiLevel::from_aqi(aq.aqi.chn);
    vec![
        "Air Quality:".to_string(),
        format!(
            "    PM2.5: {} μg/m³ ({})",
            aq.pm25,
            style.band(pm25.label(lang), pm25.icon())
        ),
        format!("    PM10: {} μg/m³", aq.pm10),
        format!("    O3: {} μg/m³", aq.o3),
        format!("    SO2: {} μg/m³", aq.so2),
        format!("    NO2: {} μg/m³", aq.no2),
        format!("    CO: {} mg/m³", aq.co),
        "    AQI:".to_string(),
        format!(
            "        China: {} ({})",
            aq.aqi.chn,
            style.band(aqi.label(lang), aqi.icon())
        ),
        format!("        USA: {}", aq.aqi.usa),
        format!("    Advice: {}", aqi.advice(lang)),
    ]
}

pub fn hourly_forecast(hourly: &Hourly, hours: u32, style: ReportStyle) -> String {
    let lang = style.lang;
    let mut lines = vec![format!("{hours}-Hour Forecast:")];
    if let Some(summary) = hourly.description.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Summary: {summary}"));
    }

    let count = hourly.temperature.len().min(hours as usize);
    let aqi = hourly.air_quality.as_ref().map(|aq| aq.aqi.as_slice()).unwrap_or(&[]);
    let pm25 = hourly.air_quality.as_ref().map(|aq| aq.pm25.as_slice()).unwrap_or(&[]);

    for (i, temp) in hourly.temperature.iter().take(count).enumerate() {
        lines.push(String::new());
        lines.push(format!("Time: {}", display_time(&temp.datetime)));
        lines.push(format!("Temperature: {:.1}°C", temp.value));
        if let Some(apparent) = hourly.apparent_temperature.get(i) {
            lines.push(format!("Feels Like: {:.1}°C", apparent.value));
        }
        if let Some(sky) = hourly.skycon.get(i) {
            lines.push(format!("Weather: {}", skycon(&sky.value, lang)));
        }
        if let Some(humidity) = hourly.humidity.get(i) {
            lines.push(format!("Humidity: {}", percent(humidity.value)));
        }
        if let Some(precip) = hourly.precipitation.get(i) {
            if let Some(probability) = precip.probability {
                lines.push(format!("Rain Probability: {probability:.0}%"));
            }
            lines.push(format!(
                "Precipitation: {}",
                format_precipitation(precip.value, PrecipitationScale::Hourly, lang)
            ));
        }
        if let Some(wind) = hourly.wind.get(i) {
            lines.push(format!("Wind: {:.1}m/s, {:.0}°", wind.speed, wind.direction));
        }
        if let Some(entry) = aqi.get(i) {
            let level = AqiLevel::from_aqi(entry.value.chn);
            lines.push(format!(
                "AQI (CN): {} ({})",
                entry.value.chn,
                level.label(lang)
            ));
        }
        if let Some(entry) = pm25.get(i) {
            let level = Pm25Level::from_concentration(entry.value);
            lines.push(format!("PM2.5: {} μg/m³ ({})", entry.value, level.label(lang)));
        }
        lines.push(SEPARATOR.to_string());
    }

    lines.join("\n")
}

pub fn daily_forecast(daily: &Daily, days: u32, style: ReportStyle, sections: DailySections) -> String {
    let lang = style.lang;
    let mut lines = vec![format!("{days}-Day Forecast:")];

    let count = daily.temperature.len().min(days as usize);
    let aqi = daily.air_quality.as_ref().map(|aq| aq.aqi.as_slice()).unwrap_or(&[]);
    let pm25 = daily.air_quality.as_ref().map(|aq| aq.pm25.as_slice()).unwrap_or(&[]);

    for (i, temp) in daily.temperature.iter().take(count).enumerate() {
        lines.push(String::new());
        lines.push(format!("Date: {}", display_date(&temp.date)));
        lines.push(format!("Temperature: {:.1}°C ~ {:.1}°C", temp.min, temp.max));
        if let Some(sky) = daily.skycon.get(i) {
            lines.push(format!("Weather: {}", skycon(&sky.value, lang)));
        }
        if let Some(precip) = daily.precipitation.get(i) {
            if let Some(probability) = precip.probability {
                lines.push(format!("Rain Probability: {probability:.0}%"));
            }
            lines.push(format!(
                "Precipitation: {}",
                format_precipitation(precip.avg, PrecipitationScale::Hourly, lang)
            ));
        }
        if sections.air_quality {
            if let Some(entry) = aqi.get(i) {
                let level = AqiLevel::from_aqi(entry.max.chn);
                lines.push(format!(
                    "AQI (CN): {} ~ {} ({})",
                    entry.min.chn,
                    entry.max.chn,
                    level.label(lang)
                ));
            }
            if let Some(entry) = pm25.get(i) {
                let level = Pm25Level::from_concentration(entry.max);
                lines.push(format!(
                    "PM2.5: {} ~ {} μg/m³ ({})",
                    entry.min,
                    entry.max,
                    level.label(lang)
                ));
            }
        }
        if sections.life_index {
            if let Some(life) = &daily.life_index {
                let parts: Vec<String> = [
                    ("UV", LifeIndexKind::UltravioletDaily, &life.ultraviolet),
                    ("Dressing", LifeIndexKind::Dressing, &life.dressing),
                    ("Comfort", LifeIndexKind::Comfort, &life.comfort),
                    ("Cold Risk", LifeIndexKind::ColdRisk, &life.cold_risk),
                    ("Car Washing", LifeIndexKind::CarWashing, &life.car_washing),
                ]
                .iter()
                .filter_map(|(label, kind, series)| {
                    let text = describe_daily_index(series.get(i)?, *kind, lang)?;
                    Some(format!("{label} {text}"))
                })
                .collect();
                if !parts.is_empty() {
                    lines.push(format!("Life Index: {}", parts.join(" | ")));
                }
            }
        }
        lines.push(SEPARATOR.to_string());
    }

    lines.join("\n")
}

fn describe_daily_index(entry: &DailyIndex, kind: LifeIndexKind, lang: Lang) -> Option<String> {
    match (&entry.desc, entry.index) {
        (Some(desc), _) if !desc.is_empty() => Some(desc.clone()),
        (_, Some(level)) => Some(kind.describe(level, lang)),
        _ => None,
    }
}

pub fn historical(hourly: &Hourly, hours: u32, style: ReportStyle) -> String {
    let mut lines = vec![format!("Past {hours}-Hour Weather:")];
    for (i, temp) in hourly.temperature.iter().take(hours as usize).enumerate() {
        lines.push(String::new());
        lines.push(format!("Time: {}", display_time(&temp.datetime)));
        lines.push(format!("Temperature: {:.1}°C", temp.value));
        if let Some(sky) = hourly.skycon.get(i) {
            lines.push(format!("Weather: {}", skycon(&sky.value, style.lang)));
        }
        lines.push(SEPARATOR.to_string());
    }
    lines.join("\n")
}

pub fn minute_precipitation(minutely: &Minutely, style: ReportStyle) -> String {
    let summary = minutely
        .description
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("No description available");
    let datasource = minutely.datasource.as_deref().unwrap_or("Unknown");

    let mut lines = vec![
        "2-Hour Minute-level Precipitation Forecast:".to_string(),
        format!("Summary: {summary}"),
        format!("Data Source: {datasource}"),
    ];
    if !minutely.probability.is_empty() {
        let chances: Vec<String> = minutely.probability.iter().map(|p| percent(*p)).collect();
        lines.push(format!("Rain Probability (30-min steps): {}", chances.join(" | ")));
    }
    lines.push(String::new());

    if minutely.precipitation_2h.is_empty() {
        lines.push("No precipitation forecast data available.".to_string());
    } else {
        for (minute, intensity) in minutely
            .precipitation_2h
            .iter()
            .enumerate()
            .step_by(MINUTELY_STEP)
        {
            lines.push(format!(
                "T+{minute:2}min: {}",
                format_precipitation(*intensity, PrecipitationScale::Minutely, style.lang)
            ));
        }
    }

    lines.join("\n")
}

/// Text returned when the minutely nowcast isn't offered for a location.
pub fn minutely_unavailable(at: Coordinate, reason: Option<&str>) -> String {
    let mut text = format!(
        "Minute-level precipitation data not available for this location ({}, {}). \
         This feature is primarily available for major cities in China.",
        at.lng(),
        at.lat()
    );
    if let Some(reason) = reason {
        text.push_str(&format!(" Error: {reason}"));
    }
    text
}

pub fn comprehensive(result: &ApiResult, style: ReportStyle) -> String {
    let lang = style.lang;
    let mut lines = vec![style.heading("🌤️", "Comprehensive Weather Report:")];
    if let Some(keypoint) = result.forecast_keypoint.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Summary: {keypoint}"));
    }

    if let Some(rt) = &result.realtime {
        lines.push(String::new());
        lines.push(style.heading("📍", "Current Conditions:"));
        lines.push(format!("Weather: {}", skycon(&rt.skycon, lang)));
        lines.push(format!("Temperature: {:.1}°C", rt.temperature));
        if let Some(apparent) = rt.apparent_temperature {
            lines.push(format!("Feels Like: {apparent:.1}°C"));
        }
        lines.push(format!("Humidity: {}", percent(rt.humidity)));
        lines.push(format!(
            "Wind: {:.1}m/s @ {:.0}°",
            rt.wind.speed, rt.wind.direction
        ));
        lines.push(format!("Pressure: {}", or_na(rt.pressure.map(|p| format!("{p:.0} Pa")))));
        lines.push(format!("Visibility: {}", or_na(rt.visibility.map(|v| format!("{v} km")))));
        lines.push(format!("Cloud Cover: {}", or_na(rt.cloudrate.map(percent))));
        lines.push(format!(
            "Solar Radiation: {}",
            or_na(rt.dswrf.map(|d| format!("{d} W/m²")))
        ));

        if let Some(aq) = &rt.air_quality {
            let level = AqiLevel::from_aqi(aq.aqi.chn);
            lines.push(String::new());
            lines.push(style.heading("🏭", "Air Quality:"));
            lines.push(format!("PM2.5: {}μg/m³ | PM10: {}μg/m³", aq.pm25, aq.pm10));
            lines.push(format!("O3: {}μg/m³ | NO2: {}μg/m³", aq.o3, aq.no2));
            lines.push(format!("SO2: {}μg/m³ | CO: {}mg/m³", aq.so2, aq.co));
            lines.push(format!(
                "AQI (CN): {} ({}) | AQI (US): {}",
                aq.aqi.chn,
                style.band(level.label(lang), level.icon()),
                aq.aqi.usa
            ));
        }
    }

    if let Some(daily) = &result.daily {
        if let Some(today) = daily.temperature.first() {
            lines.push(String::new());
            lines.push(style.heading("📅", "Today's Forecast:"));
            lines.push(format!("High: {:.1}°C | Low: {:.1}°C", today.max, today.min));
            if let Some(sky) = daily.skycon.first() {
                lines.push(format!("Weather: {}", skycon(&sky.value, lang)));
            }
            if let Some(probability) = daily.precipitation.first().and_then(|p| p.probability) {
                lines.push(format!("Rain Chance: {probability:.0}%"));
            }
        }
    }

    let alerts = result.alert.as_ref().map(|a| a.content.as_slice()).unwrap_or(&[]);
    if !alerts.is_empty() {
        lines.push(String::new());
        lines.push(style.heading("⚠️", &format!("Active Weather Alerts: {}", alerts.len())));
        for alert in alerts.iter().take(COMPREHENSIVE_ALERT_LIMIT) {
            lines.push(format!(
                "• {}: {}",
                alert.title.as_deref().unwrap_or("Alert"),
                alert.status.as_deref().unwrap_or("Unknown")
            ));
        }
    }

    lines.join("\n")
}

pub fn astronomy(daily: &Daily, days: u32, style: ReportStyle) -> String {
    let count = daily.astro.len().min(days as usize);
    if count == 0 {
        return "Astronomy data not available for this location.".to_string();
    }

    let mut lines = vec![
        style.heading("🌅", &format!("Astronomy Information (Next {count} Days):")),
    ];
    for astro in daily.astro.iter().take(count) {
        lines.push(String::new());
        lines.push(style.heading("📅", &format!("{}:", display_date(&astro.date))));
        if let (Some(rise), Some(set)) = (&astro.sunrise, &astro.sunset) {
            lines.push(style.heading(
                "☀️",
                &format!("Sun: Rise {} | Set {}", rise.time(), set.time()),
            ));
        }
        if let (Some(rise), Some(set)) = (&astro.moonrise, &astro.moonset) {
            lines.push(style.heading(
                "🌙",
                &format!("Moon: Rise {} | Set {}", rise.time(), set.time()),
            ));
        }
        if let Some(phase) = &astro.moon_phase {
            let name = moon_phase(phase, style.lang);
            let name = match moon_phase_icon(phase) {
                Some(icon) => style.band(&name, icon),
                None => name,
            };
            lines.push(style.heading("🌙", &format!("Phase: {name}")));
        }
        lines.push(SEPARATOR.to_string());
    }
    lines.join("\n")
}

pub fn alerts(section: Option<&AlertSection>) -> String {
    let alerts = section.map(|s| s.content.as_slice()).unwrap_or(&[]);
    if alerts.is_empty() {
        return "No active weather alerts.".to_string();
    }

    let mut lines = vec!["Weather Alerts:".to_string()];
    for alert in alerts {
        let field = |v: &Option<String>| v.as_deref().unwrap_or("N/A").to_string();
        lines.push(String::new());
        lines.push(format!("Title: {}", field(&alert.title)));
        lines.push(format!("Code: {}", field(&alert.code)));
        lines.push(format!("Status: {}", field(&alert.status)));
        if let Some(location) = &alert.location {
            lines.push(format!("Location: {location}"));
        }
        if let Some(source) = &alert.source {
            lines.push(format!("Source: {source}"));
        }
        if let Some(published) = alert.pubtimestamp.and_then(display_timestamp) {
            lines.push(format!("Published: {published}"));
        }
        lines.push(format!("Description: {}", field(&alert.description)));
        lines.push(SEPARATOR.to_string());
    }
    lines.join("\n")
}

/// Upstream fractions (0..1) as whole percentages.
fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| "N/A".to_string())
}

/// `2023-11-15T06:00+08:00` -> `2023-11-15 06:00`, keeping the local time.
fn display_time(raw: &str) -> String {
    parse_upstream_time(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.split('+').next().unwrap_or(raw).replace('T', " "))
}

fn display_date(raw: &str) -> String {
    parse_upstream_time(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.split('T').next().unwrap_or(raw).to_string())
}

fn parse_upstream_time(raw: &str) -> Option<DateTime<chrono::FixedOffset>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

fn display_timestamp(ts: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(ts, 0).map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApiEnvelope;

    fn fixture(name: &str) -> ApiResult {
        let raw = match name {
            "realtime" => include_str!("../tests/fixtures/realtime.json"),
            "hourly" => include_str!("../tests/fixtures/hourly.json"),
            "daily" => include_str!("../tests/fixtures/daily.json"),
            "minutely" => include_str!("../tests/fixtures/minutely.json"),
            "weather" => include_str!("../tests/fixtures/weather.json"),
            other => panic!("no fixture named {other}"),
        };
        let envelope: ApiEnvelope = serde_json::from_str(raw).expect("fixture must parse");
        envelope.result.expect("fixture must have a result")
    }

    const ZH: ReportStyle = ReportStyle {
        lang: Lang::ZhCn,
        use_emoji: true,
    };
    const EN_PLAIN: ReportStyle = ReportStyle {
        lang: Lang::EnUs,
        use_emoji: false,
    };

    #[test]
    fn realtime_report_zh() {
        let result = fixture("realtime");
        let report = realtime(result.realtime.as_ref().unwrap(), ZH, true);

        let expected = "\
Weather: 多云（白天）
Temperature: 12.3°C
Feels Like: 10.8°C
Humidity: 45%
Wind: 11.2 m/s, from 225° (clockwise from north)
Precipitation: 0.000 (无雨/雪)
Nearest Precipitation: 23.5 km away, 0.190 (小雨/雪)
Air Quality:
    PM2.5: 42 μg/m³ (良好 🟡)
    PM10: 68 μg/m³
    O3: 80 μg/m³
    SO2: 5 μg/m³
    NO2: 30 μg/m³
    CO: 0.6 mg/m³
    AQI:
        China: 60 (良 🟡)
        USA: 117
    Advice: 空气质量可接受，但某些污染物可能对极少数异常敏感人群健康有较弱影响
Life Index:
    UV: 弱
    Comfort: 凉爽";
        assert_eq!(report, expected);
    }

    #[test]
    fn realtime_report_without_life_index_or_emoji() {
        let result = fixture("realtime");
        let report = realtime(result.realtime.as_ref().unwrap(), EN_PLAIN, false);

        assert!(report.starts_with("Weather: Partly cloudy (day)\n"));
        assert!(report.contains("PM2.5: 42 μg/m³ (Good)\n"));
        assert!(report.contains("China: 60 (Good)\n"));
        assert!(!report.contains("Life Index"));
        assert!(!report.contains('🟡'));
    }

    #[test]
    fn hourly_report_classifies_each_hour() {
        let result = fixture("hourly");
        let report = hourly_forecast(result.hourly.as_ref().unwrap(), 72, ZH);

        assert!(report.starts_with("72-Hour Forecast:\nSummary: 未来24小时多云\n\nTime: 2023-11-15 06:00\n"));
        assert!(report.contains("Precipitation: 0.00mm/h (无雨/雪)"));
        assert!(report.contains("Precipitation: 1.20mm/h (中雨/雪)"));
        assert!(report.contains("Precipitation: 15.00mm/h (暴雨/雪)"));
        assert!(report.contains("Weather: 暴雨"));
        assert!(report.contains("Rain Probability: 55%"));
        assert!(report.contains("Wind: 6.3m/s, 200°"));
        assert!(report.contains("AQI (CN): 55 (良)"));
        assert!(report.contains("PM2.5: 30 μg/m³ (优秀)"));
        assert!(report.contains("PM2.5: 20 μg/m³ (优秀)"));
        assert_eq!(report.matches(SEPARATOR).count(), 3);
    }

    #[test]
    fn hourly_report_respects_requested_hours() {
        let result = fixture("hourly");
        let report = hourly_forecast(result.hourly.as_ref().unwrap(), 1, ZH);

        assert!(report.starts_with("1-Hour Forecast:"));
        assert_eq!(report.matches("Time: ").count(), 1);
        assert_eq!(
            report.lines().last(),
            Some(SEPARATOR),
            "report should end with a separator"
        );
    }

    #[test]
    fn daily_report_with_all_sections() {
        let result = fixture("daily");
        let sections = DailySections {
            life_index: true,
            air_quality: true,
        };
        let report = daily_forecast(result.daily.as_ref().unwrap(), 7, ZH, sections);

        let expected = "\
7-Day Forecast:

Date: 2023-11-15
Temperature: 3.0°C ~ 14.0°C
Weather: 晴（白天）
Rain Probability: 10%
Precipitation: 0.00mm/h (无雨/雪)
AQI (CN): 40 ~ 85 (良)
PM2.5: 20 ~ 60 μg/m³ (良好)
Life Index: UV 强 | Dressing 冷 | Comfort 凉爽 | Cold Risk 易发 | Car Washing 适宜
------------------------

Date: 2023-11-16
Temperature: 1.0°C ~ 9.5°C
Weather: 中雨
Rain Probability: 70%
Precipitation: 1.10mm/h (中雨/雪)
AQI (CN): 90 ~ 160 (中度污染)
PM2.5: 60 ~ 120 μg/m³ (中度污染)
Life Index: UV 最弱 | Dressing 寒冷 | Comfort 很冷 | Cold Risk 极易发 | Car Washing 不适宜
------------------------";
        assert_eq!(report, expected);
    }

    #[test]
    fn daily_report_omits_optional_sections() {
        let result = fixture("daily");
        let report = daily_forecast(
            result.daily.as_ref().unwrap(),
            1,
            EN_PLAIN,
            DailySections::default(),
        );

        assert!(report.starts_with("1-Day Forecast:\n\nDate: 2023-11-15\n"));
        assert!(report.contains("Weather: Clear (day)"));
        assert!(!report.contains("AQI"));
        assert!(!report.contains("PM2.5"));
        assert!(!report.contains("Life Index"));
        assert!(!report.contains("2023-11-16"));
    }

    #[test]
    fn historical_report_exact() {
        let result = fixture("hourly");
        let report = historical(result.hourly.as_ref().unwrap(), 2, EN_PLAIN);

        let expected = "\
Past 2-Hour Weather:

Time: 2023-11-15 06:00
Temperature: 10.0°C
Weather: Clear (day)
------------------------

Time: 2023-11-15 07:00
Temperature: 11.5°C
Weather: Light rain
------------------------";
        assert_eq!(report, expected);
    }

    #[test]
    fn minutely_report_samples_every_ten_minutes() {
        let result = fixture("minutely");
        let report = minute_precipitation(result.minutely.as_ref().unwrap(), ZH);

        let expected = "\
2-Hour Minute-level Precipitation Forecast:
Summary: 20分钟后开始下小雨
Data Source: radar
Rain Probability (30-min steps): 10% | 60% | 80% | 90%

T+ 0min: 0.00mm/h (无雨/雪)
T+10min: 0.50mm/h (小雨/雪)
T+20min: 4.00mm/h (中雨/雪)";
        assert_eq!(report, expected);
    }

    #[test]
    fn minutely_report_without_series() {
        let report = minute_precipitation(&Minutely::default(), ZH);
        assert!(report.contains("Summary: No description available"));
        assert!(report.contains("Data Source: Unknown"));
        assert!(report.ends_with("No precipitation forecast data available."));
    }

    #[test]
    fn minutely_unavailable_mentions_location_and_reason() {
        let at = Coordinate::new(-73.9, 40.7).unwrap();
        let text = minutely_unavailable(at, Some("API request failed with status 404"));
        assert!(text.starts_with(
            "Minute-level precipitation data not available for this location (-73.9, 40.7)."
        ));
        assert!(text.ends_with("Error: API request failed with status 404"));
        assert!(!minutely_unavailable(at, None).contains("Error"));
    }

    #[test]
    fn comprehensive_report_sections() {
        let result = fixture("weather");
        let report = comprehensive(&result, ZH);

        assert!(report.starts_with("🌤️ Comprehensive Weather Report:\nSummary: 多云，今天夜间转晴\n"));
        assert!(report.contains("📍 Current Conditions:\nWeather: 多云（白天）\n"));
        assert!(report.contains("Wind: 11.2m/s @ 225°"));
        assert!(report.contains("Pressure: 101325 Pa"));
        assert!(report.contains("Visibility: 12.5 km"));
        assert!(report.contains("Cloud Cover: 20%"));
        assert!(report.contains("Solar Radiation: 356.2 W/m²"));
        assert!(report.contains("🏭 Air Quality:\nPM2.5: 42μg/m³ | PM10: 68μg/m³"));
        assert!(report.contains("AQI (CN): 60 (良 🟡) | AQI (US): 117"));
        assert!(report.contains("📅 Today's Forecast:\nHigh: 14.0°C | Low: 3.0°C\nWeather: 晴（白天）\nRain Chance: 10%"));
        assert!(report.contains("⚠️ Active Weather Alerts: 2"));
        assert!(report.contains("• 北京市气象台发布大风蓝色预警: 预警中"));
    }

    #[test]
    fn comprehensive_report_handles_missing_sections() {
        let report = comprehensive(&ApiResult::default(), EN_PLAIN);
        assert_eq!(report, "Comprehensive Weather Report:");
    }

    #[test]
    fn astronomy_report() {
        let result = fixture("daily");
        let report = astronomy(result.daily.as_ref().unwrap(), 7, EN_PLAIN);

        let expected = "\
Astronomy Information (Next 2 Days):

2023-11-15:
Sun: Rise 06:55 | Set 16:54
Phase: Waxing Crescent
------------------------

2023-11-16:
Sun: Rise 06:56 | Set 16:53
Moon: Rise 10:12 | Set 19:40
------------------------";
        assert_eq!(report, expected);
        assert!(!report.contains('🌒'), "plain style must not carry phase icons");
    }

    #[test]
    fn astronomy_report_with_emoji_and_no_data() {
        let result = fixture("daily");
        let report = astronomy(result.daily.as_ref().unwrap(), 1, ZH);
        assert!(report.starts_with("🌅 Astronomy Information (Next 1 Days):\n\n📅 2023-11-15:\n☀️ Sun: Rise 06:55"));
        assert!(report.contains("🌙 Phase: 蛾眉月 🌒"));

        let empty = astronomy(&Daily::default(), 7, ZH);
        assert_eq!(empty, "Astronomy data not available for this location.");
    }

    #[test]
    fn alerts_report() {
        let result = fixture("weather");
        let report = alerts(result.alert.as_ref());

        assert!(report.starts_with("Weather Alerts:\n\nTitle: 北京市气象台发布大风蓝色预警\nCode: 0701\nStatus: 预警中\n"));
        assert!(report.contains("Location: 北京市"));
        assert!(report.contains("Published: 2023-11-14 22:13 UTC"));
        assert!(report.contains("Description: 受寒潮影响，气温将下降8到10℃。"));
        assert_eq!(report.matches(SEPARATOR).count(), 2);
    }

    #[test]
    fn no_alerts() {
        assert_eq!(alerts(None), "No active weather alerts.");
        assert_eq!(alerts(Some(&AlertSection::default())), "No active weather alerts.");
    }

    #[test]
    fn time_display_falls_back_on_unparseable_input() {
        assert_eq!(display_time("2023-11-15T06:00+08:00"), "2023-11-15 06:00");
        assert_eq!(display_time("2023-11-15T06:00:00Z"), "2023-11-15 06:00");
        assert_eq!(display_time("tomorrow+1"), "tomorrow");
        assert_eq!(display_date("2023-11-15T00:00+08:00"), "2023-11-15");
        assert_eq!(display_date("2023-11-15"), "2023-11-15");
    }
}
