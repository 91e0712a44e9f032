/// Session configuration for review generation and annotation
///
/// Supports loading from a TOML file with per-field defaults; a missing
/// file means defaults.
use crate::error::{ConfigError, LensError};
use crate::styles;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Review style used for generation and placeholder annotations
    #[serde(default = "default_style")]
    pub style: String,

    /// Languages annotation is enabled for
    #[serde(default = "default_enabled_languages")]
    pub enabled_languages: Vec<String>,

    /// Regenerate reviews automatically when a file is saved
    #[serde(default)]
    pub auto_generate_on_save: bool,

    /// API key forwarded to the backend; empty means the backend runs in
    /// mock mode
    #[serde(default)]
    pub api_key: String,

    /// Path to the review-generation executable
    #[serde(default = "default_backend_path")]
    pub backend_path: PathBuf,

    /// Path of the persisted review store
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_style() -> String {
    styles::DEFAULT_STYLE.to_string()
}

fn default_enabled_languages() -> Vec<String> {
    vec![
        "go".to_string(),
        "javascript".to_string(),
        "typescript".to_string(),
        "python".to_string(),
    ]
}

fn default_backend_path() -> PathBuf {
    PathBuf::from("review-backend")
}

fn default_store_path() -> PathBuf {
    crate::paths::PlatformPaths::default_store_path()
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
            enabled_languages: default_enabled_languages(),
            auto_generate_on_save: false,
            api_key: String::new(),
            backend_path: default_backend_path(),
            store_path: default_store_path(),
        }
    }
}

impl ReviewConfig {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, LensError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::LoadFailed(format!("Failed to read config file: {err}")))?;

        let config: ReviewConfig = toml::from_str(&content)
            .map_err(|err| ConfigError::ParseFailed(format!("Invalid TOML: {err}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location or fall back to defaults
    pub fn load_or_default() -> Result<Self, LensError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), LensError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| {
                ConfigError::SaveFailed(format!("Failed to create config directory: {err}"))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|err| ConfigError::SaveFailed(format!("Failed to serialize config: {err}")))?;

        std::fs::write(path, content)
            .map_err(|err| ConfigError::SaveFailed(format!("Failed to write config file: {err}")))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), LensError> {
        if self.enabled_languages.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "enabled_languages".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if self.style.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "style".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        // Unrecognized styles fall back to the default bucket at use time,
        // but flag the likely typo up front.
        if !styles::KNOWN_STYLES.contains(&self.style.to_lowercase().as_str()) {
            tracing::warn!(
                "Unknown review style '{}', placeholder annotations will use '{}'",
                self.style,
                styles::DEFAULT_STYLE
            );
        }

        Ok(())
    }
}
