use crate::error::{FormscanError, Result};
use crate::models::Language;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Default minimum overlap ratio for a region to be assigned to a field
pub const DEFAULT_MIN_OVERLAP_RATIO: f64 = 0.1;

/// Default minimum draft size, in image pixels, on both axes
pub const DEFAULT_MIN_SELECTION_PIXELS: f64 = 5.0;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for FormScan
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub default_language: ConfigValue<Language>,
    pub min_overlap_ratio: ConfigValue<f64>,
    pub min_selection_pixels: ConfigValue<f64>,
    pub server_url: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            default_language: ConfigValue::new(Language::Por, ConfigSource::Default),
            min_overlap_ratio: ConfigValue::new(DEFAULT_MIN_OVERLAP_RATIO, ConfigSource::Default),
            min_selection_pixels: ConfigValue::new(
                DEFAULT_MIN_SELECTION_PIXELS,
                ConfigSource::Default,
            ),
            server_url: ConfigValue::new(DEFAULT_SERVER_URL.to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| FormscanError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| FormscanError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(language) = file_config.default_language {
            self.default_language.update(language, ConfigSource::File);
        }

        if let Some(ratio) = file_config.min_overlap_ratio {
            self.min_overlap_ratio.update(parse_overlap_ratio(ratio)?, ConfigSource::File);
        }

        if let Some(pixels) = file_config.min_selection_pixels {
            self.min_selection_pixels
                .update(parse_selection_pixels(pixels)?, ConfigSource::File);
        }

        if let Some(url) = file_config.server_url {
            self.server_url.update(url, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // FORMSCAN_LANGUAGE
        if let Ok(language_str) = env::var("FORMSCAN_LANGUAGE") {
            match language_str.parse::<Language>() {
                Ok(language) => self.default_language.update(language, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid FORMSCAN_LANGUAGE value '{}': expected por, eng, spa, or fra",
                    language_str
                ),
            }
        }

        // FORMSCAN_MIN_OVERLAP
        if let Ok(ratio_str) = env::var("FORMSCAN_MIN_OVERLAP") {
            match ratio_str.parse::<f64>().ok().and_then(|r| parse_overlap_ratio(r).ok()) {
                Some(ratio) => self.min_overlap_ratio.update(ratio, ConfigSource::Environment),
                None => tracing::warn!(
                    "Invalid FORMSCAN_MIN_OVERLAP value '{}': expected a number in (0, 1]",
                    ratio_str
                ),
            }
        }

        // FORMSCAN_MIN_SELECTION_PX
        if let Ok(pixels_str) = env::var("FORMSCAN_MIN_SELECTION_PX") {
            match pixels_str.parse::<f64>().ok().and_then(|p| parse_selection_pixels(p).ok()) {
                Some(pixels) => self.min_selection_pixels.update(pixels, ConfigSource::Environment),
                None => tracing::warn!(
                    "Invalid FORMSCAN_MIN_SELECTION_PX value '{}': expected a positive number",
                    pixels_str
                ),
            }
        }

        // FORMSCAN_SERVER_URL
        if let Ok(url) = env::var("FORMSCAN_SERVER_URL") {
            self.server_url.update(url, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(language) = overrides.default_language {
            self.default_language.update(language, ConfigSource::Cli);
        }

        if let Some(ratio) = overrides.min_overlap_ratio {
            self.min_overlap_ratio.update(ratio, ConfigSource::Cli);
        }

        if let Some(pixels) = overrides.min_selection_pixels {
            self.min_selection_pixels.update(pixels, ConfigSource::Cli);
        }

        if let Some(url) = overrides.server_url {
            self.server_url.update(url, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "default_language".to_string(),
            (self.default_language.value.to_string(), self.default_language.source),
        );

        map.insert(
            "min_overlap_ratio".to_string(),
            (self.min_overlap_ratio.value.to_string(), self.min_overlap_ratio.source),
        );

        map.insert(
            "min_selection_pixels".to_string(),
            (self.min_selection_pixels.value.to_string(), self.min_selection_pixels.source),
        );

        map.insert("server_url".to_string(), (self.server_url.value.clone(), self.server_url.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    default_language: Option<Language>,
    min_overlap_ratio: Option<f64>,
    min_selection_pixels: Option<f64>,
    server_url: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub default_language: Option<Language>,
    pub min_overlap_ratio: Option<f64>,
    pub min_selection_pixels: Option<f64>,
    pub server_url: Option<String>,
}

/// Check a minimum overlap ratio; zero would let non-overlapping regions match
pub fn parse_overlap_ratio(ratio: f64) -> Result<f64> {
    if ratio.is_finite() && ratio > 0.0 && ratio <= 1.0 {
        Ok(ratio)
    } else {
        Err(FormscanError::ConfigInvalid {
            key: "min_overlap_ratio".to_string(),
            reason: format!("Invalid overlap ratio: {}. Use a number in (0, 1]", ratio),
        })
    }
}

/// Check a minimum selection size in image pixels
pub fn parse_selection_pixels(pixels: f64) -> Result<f64> {
    if pixels.is_finite() && pixels > 0.0 {
        Ok(pixels)
    } else {
        Err(FormscanError::ConfigInvalid {
            key: "min_selection_pixels".to_string(),
            reason: format!("Invalid selection size: {}. Use a positive number", pixels),
        })
    }
}
