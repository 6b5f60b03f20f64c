//! Normalization settings.
//!
//! The defaults live in `config/default.toml`, baked into the binary via
//! [`include_str!`]. A user file only needs the keys it overrides.

use std::path::Path;

use alert_map_geometry::FallbackOptions;
use alert_map_units_models::TemperatureUnit;
use serde::{Deserialize, Serialize};

use crate::NormalizeError;

/// The default configuration, embedded at compile time.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Top-level normalization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Unit of [`alert_map_alert_models::CanonicalAlert::normalized_temperatures`].
    pub target_temperature_unit: TemperatureUnit,
    /// Zone fallback tunables.
    pub fallback: FallbackConfig,
    /// Display-only post-processing.
    pub display: DisplayConfig,
    /// Zone dataset interpretation.
    pub zones: ZonesConfig,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            target_temperature_unit: alert_map_units::convert::DEFAULT_TARGET_TEMPERATURE_UNIT,
            fallback: FallbackConfig::default(),
            display: DisplayConfig::default(),
            zones: ZonesConfig::default(),
        }
    }
}

impl NormalizeConfig {
    /// Parses a TOML config. Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// * If the text is not valid TOML or a value has the wrong type
    pub fn from_toml_str(text: &str) -> Result<Self, NormalizeError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read
    /// * If its contents fail to parse
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NormalizeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded normalization config from {}", path.display());
        Ok(config)
    }

    /// The embedded default configuration.
    ///
    /// # Errors
    ///
    /// * If the embedded TOML fails to parse
    pub fn embedded() -> Result<Self, NormalizeError> {
        Self::from_toml_str(DEFAULT_CONFIG_TOML)
    }
}

/// Tunables for the zone fallback tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Radius of the buffer drawn around a loosely matched zone.
    pub buffer_radius_km: f64,
    /// Segments approximating that buffer.
    pub buffer_segments: usize,
    /// Leading characters of a jurisdiction code used for the loose match.
    pub prefix_len: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        let options = FallbackOptions::default();
        Self {
            buffer_radius_km: options.buffer_radius_km,
            buffer_segments: options.buffer_segments,
            prefix_len: options.prefix_len,
        }
    }
}

impl From<&FallbackConfig> for FallbackOptions {
    fn from(config: &FallbackConfig) -> Self {
        Self {
            buffer_radius_km: config.buffer_radius_km,
            buffer_segments: config.buffer_segments,
            prefix_len: config.prefix_len,
        }
    }
}

/// Output shaping applied after geometry is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// When set, resolved polygons are thinned with
    /// [`alert_map_geometry::simplify`] at this tolerance.
    pub simplify_tolerance_deg: Option<f64>,
}

/// How reference zone files are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZonesConfig {
    /// Feature properties consulted in order for a zone's identifier.
    pub id_properties: Vec<String>,
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            id_properties: vec!["id".to_string(), "UGC".to_string(), "code".to_string()],
        }
    }
}
