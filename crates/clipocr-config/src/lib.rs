//! Persistent settings for clipocr.
//!
//! Stored as JSON in `$CLIPOCR_CONFIG`, or `<config dir>/clipocr/config.json`.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clipocr_types::{InterfaceLanguage, OcrLanguage};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

const APP_CONFIG_DIR_NAME: &str = "clipocr";
const CONFIG_FILE_NAME: &str = "config.json";

/// Delays offered in the toolbar, in seconds
pub const DELAY_OPTIONS: [u64; 4] = [0, 3, 5, 10];
pub const MAX_DELAY_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No config directory available on this platform")]
    NoConfigDir,
}

fn default_tesseract_path() -> String {
    if cfg!(windows) {
        r"C:\Program Files\Tesseract-OCR\tesseract.exe".to_string()
    } else {
        "tesseract".to_string()
    }
}

/// Bad values fall back to the field default instead of rejecting the whole file
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|e| {
        tracing::warn!("Ignoring invalid config value: {e}");
        T::default()
    }))
}

fn lenient_path<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(path) => Ok(path),
        other => {
            tracing::warn!("Ignoring invalid tesseract_path: {other}");
            Ok(default_tesseract_path())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(default = "default_tesseract_path", deserialize_with = "lenient_path")]
    pub tesseract_path: String,
    #[serde(deserialize_with = "lenient")]
    pub interface_language: InterfaceLanguage,
    #[serde(deserialize_with = "lenient")]
    pub ocr_language: OcrLanguage,
    #[serde(deserialize_with = "lenient")]
    pub capture_delay_secs: u64,
    /// Path from the file while `CLIPOCR_TESSERACT` overrides it for this run
    #[serde(skip)]
    stored_tesseract_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tesseract_path: default_tesseract_path(),
            interface_language: InterfaceLanguage::default(),
            ocr_language: OcrLanguage::default(),
            capture_delay_secs: 0,
            stored_tesseract_path: None,
        }
    }
}

impl Config {
    /// Load from the default location and apply environment overrides
    pub fn new() -> Self {
        let mut config = match config_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::warn!("Falling back to default config: {e}");
                Self::default()
            }
        };
        config.apply_env();
        config
    }

    /// Missing file yields defaults; a broken file is logged and replaced by defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str::<Config>(&data) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "Loaded config");
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Invalid config file, using defaults: {e}");
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No config file yet, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to read config, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Writes the stored settings; an env override of the Tesseract path is left out
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = match &self.stored_tesseract_path {
            Some(stored) => serde_json::to_string_pretty(&Config {
                tesseract_path: stored.clone(),
                stored_tesseract_path: None,
                ..self.clone()
            })?,
            None => serde_json::to_string_pretty(self)?,
        };
        fs::write(path, data)?;
        tracing::debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(path) = env::var("CLIPOCR_TESSERACT")
            && !path.trim().is_empty()
        {
            self.override_tesseract_path(path);
        }
    }

    /// Use another Tesseract for this run without touching what gets saved
    pub fn override_tesseract_path(&mut self, path: impl Into<String>) {
        let path = path.into();
        tracing::info!(%path, "Tesseract path overridden");
        let stored = std::mem::replace(&mut self.tesseract_path, path);
        self.stored_tesseract_path.get_or_insert(stored);
    }

    /// Set the path that is both used and saved, dropping any override
    pub fn set_tesseract_path(&mut self, path: impl Into<String>) {
        self.tesseract_path = path.into();
        self.stored_tesseract_path = None;
    }

    pub fn is_tesseract_overridden(&self) -> bool {
        self.stored_tesseract_path.is_some()
    }

    pub fn capture_delay(&self) -> Duration {
        Duration::from_secs(self.capture_delay_secs.min(MAX_DELAY_SECS))
    }

    /// Position of the configured delay in [`DELAY_OPTIONS`], 0 when it is a custom value
    pub fn delay_index(&self) -> usize {
        DELAY_OPTIONS
            .iter()
            .position(|d| *d == self.capture_delay_secs)
            .unwrap_or(0)
    }
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    if let Ok(path) = env::var("CLIPOCR_CONFIG")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("clipocr-config-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join(CONFIG_FILE_NAME)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = scratch_file("missing");
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_partial_file_is_completed_with_defaults() {
        let path = scratch_file("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "interface_language": "eng" }"#).unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.interface_language, InterfaceLanguage::English);
        assert_eq!(config.tesseract_path, default_tesseract_path());
        assert_eq!(config.ocr_language, OcrLanguage::Turkish);
    }

    #[test]
    fn test_invalid_json_gives_defaults() {
        let path = scratch_file("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_save_creates_parent_and_round_trips() {
        let path = scratch_file("save");
        let config = Config {
            tesseract_path: "/opt/tesseract/bin/tesseract".into(),
            interface_language: InterfaceLanguage::English,
            ocr_language: OcrLanguage::French,
            capture_delay_secs: 5,
            stored_tesseract_path: None,
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
        assert_eq!(config.delay_index(), 2);
    }

    #[test]
    fn test_capture_delay_is_clamped() {
        let config = Config {
            capture_delay_secs: 3600,
            ..Config::default()
        };
        assert_eq!(config.capture_delay(), Duration::from_secs(60));
        assert_eq!(config.delay_index(), 0);
    }

    #[test]
    fn test_bad_field_falls_back_alone() {
        let path = scratch_file("bad-field");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{"tesseract_path":"/opt/custom/tesseract","interface_language":"deu","capture_delay_secs":5}"#,
        )
        .unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.tesseract_path, "/opt/custom/tesseract");
        assert_eq!(config.interface_language, InterfaceLanguage::Turkish);
        assert_eq!(config.capture_delay_secs, 5);
    }

    #[test]
    fn test_wrong_types_fall_back_per_field() {
        let path = scratch_file("wrong-types");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{"tesseract_path":42,"interface_language":"eng","ocr_language":"jpn","capture_delay_secs":"soon"}"#,
        )
        .unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.tesseract_path, default_tesseract_path());
        assert_eq!(config.interface_language, InterfaceLanguage::English);
        assert_eq!(config.ocr_language, OcrLanguage::Turkish);
        assert_eq!(config.capture_delay_secs, 0);
    }

    #[test]
    fn test_override_is_not_saved() {
        let path = scratch_file("override");
        let mut config = Config {
            tesseract_path: "/usr/local/bin/tesseract".into(),
            ..Config::default()
        };
        config.override_tesseract_path("/tmp/override-tesseract");
        config.interface_language = InterfaceLanguage::English;
        config.save_to(&path).unwrap();

        assert_eq!(config.tesseract_path, "/tmp/override-tesseract");
        let stored = Config::load_from(&path);
        assert_eq!(stored.tesseract_path, "/usr/local/bin/tesseract");
        assert_eq!(stored.interface_language, InterfaceLanguage::English);
    }

    #[test]
    fn test_explicit_path_replaces_override() {
        let path = scratch_file("explicit");
        let mut config = Config::default();
        config.override_tesseract_path("/tmp/override-tesseract");
        config.set_tesseract_path("/opt/chosen/tesseract");
        assert!(!config.is_tesseract_overridden());
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).tesseract_path, "/opt/chosen/tesseract");
    }
}
