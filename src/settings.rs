use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use dotenv::dotenv;

use crate::error::SettingsError;
use crate::i18n::Language;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

static SETTINGS: OnceLock<Settings> = OnceLock::new();

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the venue REST server
    pub api_base_url: String,
    /// Language tag used until the visitor picks one
    pub default_language: String,
    /// Hourly price of the outbound (mobile) booking
    pub outbound_price: f64,
    /// How long the booking confirmation stays before reverting, in ms
    pub success_reset_ms: u64,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("VR_ARENA_API_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string(),
            default_language: "de".to_string(),
            outbound_price: 50.0,
            success_reset_ms: 2000,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        dotenv().ok();

        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_yaml::from_str(contents)?;

        settings.api_base_url = parse_env_var(&settings.api_base_url)?;

        Ok(settings)
    }

    pub fn language(&self) -> Language {
        Language::from_tag(&self.default_language).unwrap_or(Language::De)
    }

    /// Makes `settings` the process-wide configuration. Only the first call
    /// has an effect.
    pub fn install(settings: Settings) -> &'static Settings {
        SETTINGS.get_or_init(|| settings)
    }

    /// Installed settings, or the build-time defaults.
    pub fn current() -> &'static Settings {
        SETTINGS.get_or_init(Settings::default)
    }
}

/// The part of [`Settings`] the browser needs. The server sends it along
/// with the first render so both sides agree on prices, timings and the
/// API location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicSettings {
    pub api_base_url: String,
    pub default_language: String,
    pub outbound_price: f64,
    pub success_reset_ms: u64,
}

impl From<&Settings> for PublicSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            api_base_url: settings.api_base_url.clone(),
            default_language: settings.default_language.clone(),
            outbound_price: settings.outbound_price,
            success_reset_ms: settings.success_reset_ms,
        }
    }
}

impl PublicSettings {
    /// Full settings with the server-only keys left at their defaults.
    pub fn into_settings(self) -> Settings {
        Settings {
            api_base_url: self.api_base_url,
            default_language: self.default_language,
            outbound_price: self.outbound_price,
            success_reset_ms: self.success_reset_ms,
            ..Settings::default()
        }
    }
}

fn parse_env_var(value: &str) -> Result<String, SettingsError> {
    if value.starts_with("${") && value.ends_with('}') {
        let env_name = &value[2..value.len() - 1];
        env::var(env_name).map_err(|_| SettingsError::MissingEnv(env_name.to_string()))
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let settings = Settings::from_yaml_str("outbound_price: 65\n").unwrap();
        assert_eq!(settings.outbound_price, 65.0);
        assert_eq!(settings.success_reset_ms, 2000);
        assert_eq!(settings.language(), Language::De);
    }

    #[test]
    fn base_url_placeholder_is_read_from_env() {
        env::set_var("VR_ARENA_TEST_API", "https://api.arena.test");
        let settings = Settings::from_yaml_str("api_base_url: \"${VR_ARENA_TEST_API}\"\n").unwrap();
        assert_eq!(settings.api_base_url, "https://api.arena.test");
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let result = Settings::from_yaml_str("api_base_url: \"${VR_ARENA_SURELY_UNSET}\"\n");
        assert!(matches!(result, Err(SettingsError::MissingEnv(name)) if name == "VR_ARENA_SURELY_UNSET"));
    }

    #[test]
    fn public_settings_carry_browser_keys_only() {
        let settings = Settings {
            api_base_url: "https://api.arena.test".into(),
            default_language: "ru".into(),
            outbound_price: 65.0,
            success_reset_ms: 3500,
            log_level: "debug".into(),
        };
        let public = PublicSettings::from(&settings);
        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("log_level").is_none());

        let restored: PublicSettings = serde_json::from_value(json).unwrap();
        let browser = restored.into_settings();
        assert_eq!(browser.outbound_price, 65.0);
        assert_eq!(browser.success_reset_ms, 3500);
        assert_eq!(browser.api_base_url, "https://api.arena.test");
        assert_eq!(browser.language(), Language::Ru);
        assert_eq!(browser.log_level, Settings::default().log_level);
    }

    #[test]
    fn unknown_language_falls_back_to_german() {
        let settings = Settings {
            default_language: "fr".into(),
            ..Settings::default()
        };
        assert_eq!(settings.language(), Language::De);
    }
}
