//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\nanny-ai\config.toml
//! - macOS: ~/Library/Application Support/nanny-ai/config.toml
//! - Linux: ~/.config/nanny-ai/config.toml
//!
//! The config file is human-readable and editable. Every section is
//! optional; missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::classifier::ClassifierConfig;
use crate::classifier::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::comfort::DEFAULT_REFRESH_INTERVAL;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials
    pub credentials: Credentials,

    /// Classification service settings
    pub classifier: ClassifierSettings,

    /// Microphone settings
    pub capture: CaptureSettings,

    /// In-memory history settings
    pub history: HistorySettings,

    /// Rotating tips
    pub comfort: ComfortSettings,

    /// Access gate
    pub access: AccessSettings,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Gemini API key (overridden by --api-key / GEMINI_API_KEY)
    pub gemini_api_key: Option<String>,
}

/// Classification service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    pub model: String,

    pub base_url: String,

    /// Language for explanations and advice
    pub language: String,

    /// Total tries per clip; only transport failures are retried
    pub max_attempts: u32,

    /// Request timeout in seconds (unset = transport default)
    pub timeout_secs: Option<u64>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "English".to_string(),
            max_attempts: 1,
            timeout_secs: None,
        }
    }
}

/// Microphone settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    /// Input device name (empty = system default)
    pub device: String,

    /// Recording stops automatically after this many seconds
    pub max_duration_secs: u64,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            device: String::new(),
            max_duration_secs: 30,
        }
    }
}

/// In-memory history settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Keep at most this many entries (unset = unbounded)
    pub max_entries: Option<usize>,
}

/// Rotating tips
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComfortSettings {
    pub refresh_interval_secs: u64,
}

impl Default for ComfortSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL.as_secs(),
        }
    }
}

/// Access gate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessSettings {
    /// Passphrase required by `login` (unset = no gate)
    pub passphrase: Option<String>,
}

impl Config {
    /// Build the gateway config, preferring `api_key_override` when given.
    pub fn classifier_config(&self, api_key_override: Option<&str>) -> ClassifierConfig {
        let api_key = api_key_override
            .map(str::to_string)
            .or_else(|| self.credentials.gemini_api_key.clone())
            .unwrap_or_default();

        ClassifierConfig {
            api_key,
            model: self.classifier.model.clone(),
            base_url: self.classifier.base_url.clone(),
            language: self.classifier.language.clone(),
            max_attempts: self.classifier.max_attempts.max(1),
            timeout: self.classifier.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn max_capture_duration(&self) -> Duration {
        Duration::from_secs(self.capture.max_duration_secs.max(1))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.comfort.refresh_interval_secs)
    }

    pub fn input_device(&self) -> Option<String> {
        Some(self.capture.device.clone()).filter(|d| !d.trim().is_empty())
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("nanny-ai"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file, with the same fallbacks as [`load`].
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to a specific file.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[classifier]"));
        assert!(toml.contains("[capture]"));
        assert!(toml.contains("[comfort]"));
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.credentials.gemini_api_key = Some("test-key-123".to_string());
        config.classifier.max_attempts = 3;
        config.history.max_entries = Some(50);

        save_to(&config, &path).unwrap();
        let parsed = load_from(&path);

        assert_eq!(
            parsed.credentials.gemini_api_key,
            Some("test-key-123".to_string())
        );
        assert_eq!(parsed.classifier.max_attempts, 3);
        assert_eq!(parsed.history.max_entries, Some(50));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[classifier]
language = "Arabic"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.classifier.language, "Arabic");
        assert_eq!(config.classifier.model, DEFAULT_MODEL);
        assert_eq!(config.classifier.max_attempts, 1);
        assert_eq!(config.capture.max_duration_secs, 30);
        assert_eq!(config.comfort.refresh_interval_secs, 60);
        assert!(config.access.passphrase.is_none());
    }

    #[test]
    fn test_unparseable_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[classifier\nmodel = ").unwrap();

        let config = load_from(&path);

        assert_eq!(config.classifier.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_api_key_override_wins() {
        let mut config = Config::default();
        config.credentials.gemini_api_key = Some("from-file".to_string());

        assert_eq!(config.classifier_config(Some("from-env")).api_key, "from-env");
        assert_eq!(config.classifier_config(None).api_key, "from-file");
        assert_eq!(Config::default().classifier_config(None).api_key, "");
    }

    #[test]
    fn test_blank_device_means_default() {
        let mut config = Config::default();
        assert!(config.input_device().is_none());
        config.capture.device = "USB Mic".to_string();
        assert_eq!(config.input_device().as_deref(), Some("USB Mic"));
    }
}
