//! Lookup tables that turn upstream codes and measurements into localized
//! text: weather phenomena, precipitation intensity, AQI and PM2.5 bands,
//! life indices and moon phases.

use crate::model::Lang;

/// Localized description of a `skycon` code. Unknown codes are returned as-is.
pub fn skycon(code: &str, lang: Lang) -> String {
    let pair = match code {
        "CLEAR_DAY" => ("晴（白天）", "Clear (day)"),
        "CLEAR_NIGHT" => ("晴（夜间）", "Clear (night)"),
        "PARTLY_CLOUDY_DAY" => ("多云（白天）", "Partly cloudy (day)"),
        "PARTLY_CLOUDY_NIGHT" => ("多云（夜间）", "Partly cloudy (night)"),
        "CLOUDY" => ("阴", "Cloudy"),
        "LIGHT_HAZE" => ("轻度雾霾", "Light haze"),
        "MODERATE_HAZE" => ("中度雾霾", "Moderate haze"),
        "HEAVY_HAZE" => ("重度雾霾", "Heavy haze"),
        "LIGHT_RAIN" => ("小雨", "Light rain"),
        "MODERATE_RAIN" => ("中雨", "Moderate rain"),
        "HEAVY_RAIN" => ("大雨", "Heavy rain"),
        "STORM_RAIN" => ("暴雨", "Storm rain"),
        "FOG" => ("雾", "Fog"),
        "LIGHT_SNOW" => ("小雪", "Light snow"),
        "MODERATE_SNOW" => ("中雪", "Moderate snow"),
        "HEAVY_SNOW" => ("大雪", "Heavy snow"),
        "STORM_SNOW" => ("暴雪", "Snowstorm"),
        "DUST" => ("浮尘", "Dust"),
        "SAND" => ("沙尘", "Sand"),
        "WIND" => ("大风", "Strong wind"),
        _ => return code.to_string(),
    };
    pick(lang, pair).to_string()
}

fn pick(lang: Lang, (zh, en): (&'static str, &'static str)) -> &'static str {
    match lang {
        Lang::ZhCn => zh,
        Lang::EnUs => en,
    }
}

// ---------------------------------------------------------------------------
// Precipitation
// ---------------------------------------------------------------------------

/// Which measurement a precipitation intensity comes from. Each has its own
/// unit and cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipitationScale {
    /// Radar reflectivity-derived intensity, 0..1.
    Radar,
    /// Hourly forecast, mm/h.
    Hourly,
    /// Minute-level nowcast, mm/h.
    Minutely,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrecipitationLevel {
    None,
    Light,
    Moderate,
    Heavy,
    Storm,
}

impl PrecipitationScale {
    /// Upper (exclusive) bounds of None, Light, Moderate and Heavy.
    fn cutoffs(&self) -> [f64; 4] {
        match self {
            PrecipitationScale::Radar => [0.031, 0.25, 0.35, 0.48],
            PrecipitationScale::Hourly => [0.0606, 0.8989, 2.87, 12.8638],
            PrecipitationScale::Minutely => [0.08, 3.44, 11.33, 51.30],
        }
    }

    pub fn classify(&self, intensity: f64) -> PrecipitationLevel {
        const LEVELS: [PrecipitationLevel; 4] = [
            PrecipitationLevel::None,
            PrecipitationLevel::Light,
            PrecipitationLevel::Moderate,
            PrecipitationLevel::Heavy,
        ];
        self.cutoffs()
            .iter()
            .zip(LEVELS)
            .find(|(cutoff, _)| intensity < **cutoff)
            .map(|(_, level)| level)
            .unwrap_or(PrecipitationLevel::Storm)
    }
}

impl PrecipitationLevel {
    pub fn label(&self, lang: Lang) -> &'static str {
        pick(
            lang,
            match self {
                PrecipitationLevel::None => ("无雨/雪", "no rain/snow"),
                PrecipitationLevel::Light => ("小雨/雪", "light rain/snow"),
                PrecipitationLevel::Moderate => ("中雨/雪", "moderate rain/snow"),
                PrecipitationLevel::Heavy => ("大雨/雪", "heavy rain/snow"),
                PrecipitationLevel::Storm => ("暴雨/雪", "storm rain/snow"),
            },
        )
    }
}

/// `0.120 (小雨/雪)` for radar, `1.50mm/h (中雨/雪)` for the mm/h scales.
pub fn format_precipitation(intensity: f64, scale: PrecipitationScale, lang: Lang) -> String {
    let label = scale.classify(intensity).label(lang);
    match scale {
        PrecipitationScale::Radar => format!("{intensity:.3} ({label})"),
        PrecipitationScale::Hourly | PrecipitationScale::Minutely => {
            format!("{intensity:.2}mm/h ({label})")
        }
    }
}

// ---------------------------------------------------------------------------
// Air quality
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AqiLevel {
    Excellent,
    Good,
    LightlyPolluted,
    ModeratelyPolluted,
    HeavilyPolluted,
    SeverelyPolluted,
}

impl AqiLevel {
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi <= 50.0 {
            AqiLevel::Excellent
        } else if aqi <= 100.0 {
            AqiLevel::Good
        } else if aqi <= 150.0 {
            AqiLevel::LightlyPolluted
        } else if aqi <= 200.0 {
            AqiLevel::ModeratelyPolluted
        } else if aqi <= 300.0 {
            AqiLevel::HeavilyPolluted
        } else {
            AqiLevel::SeverelyPolluted
        }
    }

    pub fn label(&self, lang: Lang) -> &'static str {
        pick(
            lang,
            match self {
                AqiLevel::Excellent => ("优", "Excellent"),
                AqiLevel::Good => ("良", "Good"),
                AqiLevel::LightlyPolluted => ("轻度污染", "Lightly polluted"),
                AqiLevel::ModeratelyPolluted => ("中度污染", "Moderately polluted"),
                AqiLevel::HeavilyPolluted => ("重度污染", "Heavily polluted"),
                AqiLevel::SeverelyPolluted => ("严重污染", "Severely polluted"),
            },
        )
    }

    pub fn advice(&self, lang: Lang) -> &'static str {
        pick(
            lang,
            match self {
                AqiLevel::Excellent => (
                    "空气质量令人满意，基本无空气污染",
                    "Air quality is satisfactory with little or no pollution",
                ),
                AqiLevel::Good => (
                    "空气质量可接受，但某些污染物可能对极少数异常敏感人群健康有较弱影响",
                    "Air quality is acceptable; some pollutants may slightly affect a very small number of unusually sensitive people",
                ),
                AqiLevel::LightlyPolluted => (
                    "易感人群症状有轻度加剧，健康人群出现刺激症状",
                    "Symptoms of sensitive groups are slightly aggravated; healthy people may feel irritation",
                ),
                AqiLevel::ModeratelyPolluted => (
                    "进一步加剧易感人群症状，可能对健康人群心脏、呼吸系统有影响",
                    "Symptoms of sensitive groups worsen further; may affect the heart and respiratory system of healthy people",
                ),
                AqiLevel::HeavilyPolluted => (
                    "心脏病和肺病患者症状显著加剧，运动耐受力降低，健康人群普遍出现症状",
                    "Symptoms of heart and lung patients worsen markedly with reduced exercise tolerance; healthy people commonly show symptoms",
                ),
                AqiLevel::SeverelyPolluted => (
                    "健康人群运动耐受力降低，有明显强烈症状，提前出现某些疾病",
                    "Healthy people have reduced exercise tolerance and strong symptoms; some illnesses may appear early",
                ),
            },
        )
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AqiLevel::Excellent => "🟢",
            AqiLevel::Good => "🟡",
            AqiLevel::LightlyPolluted => "🟠",
            AqiLevel::ModeratelyPolluted => "🔴",
            AqiLevel::HeavilyPolluted => "🟣",
            AqiLevel::SeverelyPolluted => "⚫",
        }
    }
}

/// PM2.5 concentration bands (μg/m³). Shares icons with the AQI bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Pm25Level {
    Excellent,
    Good,
    LightlyPolluted,
    ModeratelyPolluted,
    HeavilyPolluted,
    SeverelyPolluted,
}

impl Pm25Level {
    pub fn from_concentration(pm25: f64) -> Self {
        if pm25 <= 35.0 {
            Pm25Level::Excellent
        } else if pm25 <= 75.0 {
            Pm25Level::Good
        } else if pm25 <= 115.0 {
            Pm25Level::LightlyPolluted
        } else if pm25 <= 150.0 {
            Pm25Level::ModeratelyPolluted
        } else if pm25 <= 250.0 {
            Pm25Level::HeavilyPolluted
        } else {
            Pm25Level::SeverelyPolluted
        }
    }

    pub fn label(&self, lang: Lang) -> &'static str {
        pick(
            lang,
            match self {
                Pm25Level::Excellent => ("优秀", "Excellent"),
                Pm25Level::Good => ("良好", "Good"),
                Pm25Level::LightlyPolluted => ("轻度污染", "Lightly polluted"),
                Pm25Level::ModeratelyPolluted => ("中度污染", "Moderately polluted"),
                Pm25Level::HeavilyPolluted => ("重度污染", "Heavily polluted"),
                Pm25Level::SeverelyPolluted => ("严重污染", "Severely polluted"),
            },
        )
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Pm25Level::Excellent => "🟢",
            Pm25Level::Good => "🟡",
            Pm25Level::LightlyPolluted => "🟠",
            Pm25Level::ModeratelyPolluted => "🔴",
            Pm25Level::HeavilyPolluted => "🟣",
            Pm25Level::SeverelyPolluted => "⚫",
        }
    }
}

// ---------------------------------------------------------------------------
// Life indices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifeIndexKind {
    /// Realtime UV, 0..=11.
    Ultraviolet,
    /// Daily UV, 1..=5.
    UltravioletDaily,
    Dressing,
    Comfort,
    ColdRisk,
    CarWashing,
}

impl LifeIndexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifeIndexKind::Ultraviolet => "ultraviolet",
            LifeIndexKind::UltravioletDaily => "ultraviolet_daily",
            LifeIndexKind::Dressing => "dressing",
            LifeIndexKind::Comfort => "comfort",
            LifeIndexKind::ColdRisk => "coldRisk",
            LifeIndexKind::CarWashing => "carWashing",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ultraviolet" => Some(LifeIndexKind::Ultraviolet),
            "ultraviolet_daily" => Some(LifeIndexKind::UltravioletDaily),
            "dressing" => Some(LifeIndexKind::Dressing),
            "comfort" => Some(LifeIndexKind::Comfort),
            "coldRisk" => Some(LifeIndexKind::ColdRisk),
            "carWashing" => Some(LifeIndexKind::CarWashing),
            _ => None,
        }
    }

    fn level_text(&self, level: i64) -> Option<(&'static str, &'static str)> {
        let text = match (self, level) {
            (LifeIndexKind::Ultraviolet, 0) => ("无", "None"),
            (LifeIndexKind::Ultraviolet, 1 | 2) => ("很弱", "Very weak"),
            (LifeIndexKind::Ultraviolet, 3 | 4) => ("弱", "Weak"),
            (LifeIndexKind::Ultraviolet, 5 | 6) => ("中等", "Moderate"),
            (LifeIndexKind::Ultraviolet, 7..=9) => ("强", "Strong"),
            (LifeIndexKind::Ultraviolet, 10) => ("很强", "Very strong"),
            (LifeIndexKind::Ultraviolet, 11) => ("极强", "Extreme"),

            (LifeIndexKind::UltravioletDaily, 1) => ("最弱", "Weakest"),
            (LifeIndexKind::UltravioletDaily, 2) => ("弱", "Weak"),
            (LifeIndexKind::UltravioletDaily, 3) => ("中等", "Moderate"),
            (LifeIndexKind::UltravioletDaily, 4) => ("强", "Strong"),
            (LifeIndexKind::UltravioletDaily, 5) => ("很强", "Very strong"),

            (LifeIndexKind::Dressing, 0 | 1) => ("极热", "Extremely hot"),
            (LifeIndexKind::Dressing, 2) => ("很热", "Very hot"),
            (LifeIndexKind::Dressing, 3) => ("热", "Hot"),
            (LifeIndexKind::Dressing, 4) => ("温暖", "Warm"),
            (LifeIndexKind::Dressing, 5) => ("凉爽", "Cool"),
            (LifeIndexKind::Dressing, 6) => ("冷", "Cold"),
            (LifeIndexKind::Dressing, 7) => ("寒冷", "Very cold"),
            (LifeIndexKind::Dressing, 8) => ("极冷", "Extremely cold"),

            (LifeIndexKind::Comfort, 0) => ("闷热", "Muggy"),
            (LifeIndexKind::Comfort, 1) => ("酷热", "Scorching"),
            (LifeIndexKind::Comfort, 2) => ("很热", "Very hot"),
            (LifeIndexKind::Comfort, 3) => ("热", "Hot"),
            (LifeIndexKind::Comfort, 4) => ("温暖", "Warm"),
            (LifeIndexKind::Comfort, 5) => ("舒适", "Comfortable"),
            (LifeIndexKind::Comfort, 6) => ("凉爽", "Cool"),
            (LifeIndexKind::Comfort, 7) => ("冷", "Cold"),
            (LifeIndexKind::Comfort, 8) => ("很冷", "Very cold"),
            (LifeIndexKind::Comfort, 9) => ("寒冷", "Frigid"),
            (LifeIndexKind::Comfort, 10) => ("极冷", "Extremely cold"),
            (LifeIndexKind::Comfort, 11) => ("刺骨的冷", "Bitterly cold"),
            (LifeIndexKind::Comfort, 12) => ("湿冷", "Damp cold"),
            (LifeIndexKind::Comfort, 13) => ("干冷", "Dry cold"),

            (LifeIndexKind::ColdRisk, 1) => ("少发", "Rare"),
            (LifeIndexKind::ColdRisk, 2) => ("较易发", "Fairly likely"),
            (LifeIndexKind::ColdRisk, 3) => ("易发", "Likely"),
            (LifeIndexKind::ColdRisk, 4) => ("极易发", "Very likely"),

            (LifeIndexKind::CarWashing, 1) => ("适宜", "Suitable"),
            (LifeIndexKind::CarWashing, 2) => ("较适宜", "Fairly suitable"),
            (LifeIndexKind::CarWashing, 3) => ("较不适宜", "Not very suitable"),
            (LifeIndexKind::CarWashing, 4) => ("不适宜", "Unsuitable"),

            _ => return None,
        };
        Some(text)
    }

    /// Description of a level, with an "unknown level" fallback.
    pub fn describe(&self, level: i64, lang: Lang) -> String {
        match self.level_text(level) {
            Some(pair) => pick(lang, pair).to_string(),
            None => match lang {
                Lang::ZhCn => format!("未知等级({level})"),
                Lang::EnUs => format!("Unknown level ({level})"),
            },
        }
    }
}

/// Describe a level of a life index given by its upstream name.
pub fn life_index(kind: &str, level: i64, lang: Lang) -> String {
    match LifeIndexKind::from_name(kind) {
        Some(kind) => kind.describe(level, lang),
        None => match lang {
            Lang::ZhCn => format!("未知指数({kind}: {level})"),
            Lang::EnUs => format!("Unknown index ({kind}: {level})"),
        },
    }
}

// ---------------------------------------------------------------------------
// Astronomy
// ---------------------------------------------------------------------------

pub fn moon_phase(phase: &str, lang: Lang) -> String {
    let pair = match phase {
        "new" => ("新月", "New Moon"),
        "waxing_crescent" => ("蛾眉月", "Waxing Crescent"),
        "first_quarter" => ("上弦月", "First Quarter"),
        "waxing_gibbous" => ("盈凸月", "Waxing Gibbous"),
        "full" => ("满月", "Full Moon"),
        "waning_gibbous" => ("亏凸月", "Waning Gibbous"),
        "last_quarter" => ("下弦月", "Last Quarter"),
        "waning_crescent" => ("残月", "Waning Crescent"),
        _ => {
            return match lang {
                Lang::ZhCn => format!("未知 ({phase})"),
                Lang::EnUs => format!("Unknown ({phase})"),
            };
        }
    };
    pick(lang, pair).to_string()
}

pub fn moon_phase_icon(phase: &str) -> Option<&'static str> {
    match phase {
        "new" => Some("🌑"),
        "waxing_crescent" => Some("🌒"),
        "first_quarter" => Some("🌓"),
        "waxing_gibbous" => Some("🌔"),
        "full" => Some("🌕"),
        "waning_gibbous" => Some("🌖"),
        "last_quarter" => Some("🌗"),
        "waning_crescent" => Some("🌘"),
        _ => None,
    }
}
