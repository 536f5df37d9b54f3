use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Name of the JSON file holding the user name and saved locations.
pub const STATE_FILE_NAME: &str = "weather_outfit_config.json";

/// Application settings stored on disk.
///
/// Example TOML:
/// ```toml
/// geocoding_url = "https://geocoding-api.open-meteo.com/v1/search"
/// forecast_url = "https://api.open-meteo.com/v1/forecast"
/// state_file = "/home/me/.outfit/state.json"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub geocoding_url: String,
    pub forecast_url: String,

    /// Overrides the platform data directory location of the state file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            state_file: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        Ok(settings)
    }

    /// Like [`Settings::load`], but a missing config directory or a broken
    /// file falls back to defaults instead of failing.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(fall_back)
    }

    pub fn load_or_default_from(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(fall_back)
    }

    /// Save settings to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        Ok(())
    }

    /// Where the user name and saved locations live.
    pub fn state_file_path(&self) -> Result<PathBuf> {
        match &self.state_file {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(STATE_FILE_NAME)),
        }
    }

    /// [`Settings::state_file_path`], falling back to the working directory
    /// when no platform data directory exists.
    pub fn state_file_or_local(&self) -> PathBuf {
        self.state_file_path().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "storing state in the working directory");
            PathBuf::from(STATE_FILE_NAME)
        })
    }

    pub fn settings_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("settings.toml"))
    }
}

fn fall_back(e: anyhow::Error) -> Settings {
    tracing::warn!("ignoring settings, using defaults: {e:#}");
    Settings::default()
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "outfit-forecast", "outfit")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.toml")).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.forecast_url, DEFAULT_FORECAST_URL);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "forecast_url = \"http://localhost:8080/v1/forecast\"\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.forecast_url, "http://localhost:8080/v1/forecast");
        assert_eq!(settings.geocoding_url, DEFAULT_GEOCODING_URL);
        assert!(settings.state_file.is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let settings = Settings {
            state_file: Some(dir.path().join("state.json")),
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "geocoding_url = [").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "geocoding_url = [").unwrap();

        assert_eq!(Settings::load_or_default_from(&path), Settings::default());
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();

        // A directory where the file should be cannot be read as text.
        assert_eq!(Settings::load_or_default_from(dir.path()), Settings::default());
    }

    #[test]
    fn state_file_or_local_keeps_override() {
        let settings = Settings { state_file: Some("/tmp/x.json".into()), ..Settings::default() };
        assert_eq!(settings.state_file_or_local(), PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn state_file_override_wins() {
        let settings = Settings { state_file: Some("/tmp/x.json".into()), ..Settings::default() };
        assert_eq!(settings.state_file_path().unwrap(), PathBuf::from("/tmp/x.json"));
    }
}
