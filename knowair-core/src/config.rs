use anyhow::{Context, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::{
    error::WeatherError,
    model::{Coordinate, Lang},
    provider::Endpoint,
};

/// Environment variable holding the Caiyun API token. Takes precedence over
/// the token stored in the config file.
pub const TOKEN_ENV: &str = "CAIYUN_WEATHER_API_TOKEN";

pub const DEFAULT_BASE_URL: &str = "https://api.caiyunapp.com/v2.6";

/// Upper bounds for the count parameters accepted by the tools.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Limits {
    pub max_hourly_hours: u32,
    pub max_daily_days: u32,
    pub max_history_hours: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_hourly_hours: 360,
            max_daily_days: 15,
            max_history_hours: 72,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    pub use_emoji: bool,
    pub show_air_quality_trends: bool,
    pub show_life_indices: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            use_emoji: true,
            show_air_quality_trends: true,
            show_life_indices: true,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_token = "..."
/// lang = "en_US"
///
/// [display]
/// use_emoji = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_token: Option<String>,
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub lang: Lang,
    pub limits: Limits,
    pub display: DisplaySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            lang: Lang::default(),
            limits: Limits::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl Config {
    /// Load config from the platform config directory, or return defaults if
    /// it doesn't exist yet. The token environment variable is applied on top.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let cfg = Self::read_file(path)?;
        Ok(cfg.with_env_token(std::env::var(TOKEN_ENV).ok()))
    }

    /// Read only the file, without environment overrides. Missing file means
    /// defaults.
    pub fn read_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Override the stored token with one taken from the environment, if set
    /// and non-empty.
    pub fn with_env_token(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.api_token = Some(token);
        }
        self
    }

    /// Save config to the given path, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> anyhow::Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "knowair", "knowair-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn has_token(&self) -> bool {
        self.validate_token().is_ok()
    }

    /// Returns the API token, or a configuration error if none is set.
    pub fn validate_token(&self) -> Result<&str, WeatherError> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(WeatherError::MissingToken)
    }

    /// Full URL for an endpoint at a coordinate.
    pub fn api_url(&self, token: &str, at: Coordinate, endpoint: Endpoint) -> String {
        format!(
            "{}/{}/{}/{}",
            self.api_base_url.trim_end_matches('/'),
            token,
            at,
            endpoint.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_limits() {
        let cfg = Config::default();
        assert_eq!(cfg.api_base_url, "https://api.caiyunapp.com/v2.6");
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.lang, Lang::ZhCn);
        assert_eq!(cfg.limits.max_hourly_hours, 360);
        assert_eq!(cfg.limits.max_daily_days, 15);
        assert!(cfg.display.use_emoji);
    }

    #[test]
    fn validate_token_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.validate_token().unwrap_err();
        assert!(err.to_string().contains("API token not configured"));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let cfg = Config {
            api_token: Some("   ".into()),
            ..Config::default()
        };
        assert!(matches!(cfg.validate_token(), Err(WeatherError::MissingToken)));
        assert!(!cfg.has_token());
    }

    #[test]
    fn env_token_overrides_file_token() {
        let cfg = Config {
            api_token: Some("FILE".into()),
            ..Config::default()
        };
        let cfg = cfg.with_env_token(Some("ENV".into()));
        assert_eq!(cfg.validate_token().unwrap(), "ENV");
    }

    #[test]
    fn empty_env_token_keeps_file_token() {
        let cfg = Config {
            api_token: Some("FILE".into()),
            ..Config::default()
        };
        let cfg = cfg.with_env_token(Some(String::new())).with_env_token(None);
        assert_eq!(cfg.validate_token().unwrap(), "FILE");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            api_token = "abc"
            lang = "en_US"

            [display]
            use_emoji = false
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.api_token.as_deref(), Some("abc"));
        assert_eq!(cfg.lang, Lang::EnUs);
        assert!(!cfg.display.use_emoji);
        assert!(cfg.display.show_life_indices);
        assert_eq!(cfg.limits, Limits::default());
        assert_eq!(cfg.api_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn unknown_lang_is_rejected() {
        assert!(Config::from_toml_str(r#"lang = "fr_FR""#).is_err());
    }

    #[test]
    fn api_url_places_token_and_coordinate_in_path() {
        let cfg = Config {
            api_base_url: "http://localhost:8080/v2.6/".into(),
            ..Config::default()
        };
        let at = Coordinate::new(121.5, 31.2).unwrap();
        assert_eq!(
            cfg.api_url("TOKEN", at, Endpoint::Hourly),
            "http://localhost:8080/v2.6/TOKEN/121.5,31.2/hourly"
        );
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let dir = std::env::temp_dir().join(format!("knowair-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        let cfg = Config {
            api_token: Some("SAVED".into()),
            lang: Lang::EnUs,
            ..Config::default()
        };
        cfg.save_to(&path).expect("save config");

        let loaded = Config::read_file(&path).expect("read config");
        assert_eq!(loaded.api_token.as_deref(), Some("SAVED"));
        assert_eq!(loaded.lang, Lang::EnUs);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_reads_as_defaults() {
        let path = std::env::temp_dir().join("knowair-config-does-not-exist.toml");
        let cfg = Config::read_file(&path).expect("defaults");
        assert!(cfg.api_token.is_none());
        assert_eq!(cfg.lang, Lang::ZhCn);
    }
}
