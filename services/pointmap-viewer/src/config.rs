//! Configuration loading for the viewer service.
//!
//! Loads `config/viewer.yaml` (or the path given on the command line). Every
//! field has a default, and a missing file means "all defaults".

use std::path::Path;

use anyhow::{bail, Context, Result};
use pointmap_common::{DisplayParameters, ToggleState};
use pointmap_core::{
    Normalizer, ViewerSettings, DEFAULT_MAX_ZOOM, DEFAULT_PAD_FRACTION, DEFAULT_WEIGHT_FIELD,
};
use serde::Deserialize;
use tracing::{debug, info};

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub toggles: TogglesConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Where the point payload comes from and how to read it.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// URL (`http://`, `https://`) or file path of the JSON payload.
    #[serde(default = "default_source")]
    pub source: String,
    /// Object key holding the weight in named-field records.
    #[serde(default = "default_weight_field")]
    pub weight_field: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            weight_field: default_weight_field(),
        }
    }
}

fn default_source() -> String {
    "data/members_points.json".to_string()
}

fn default_weight_field() -> String {
    DEFAULT_WEIGHT_FIELD.to_string()
}

/// Initial layer parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f64,
    #[serde(default = "default_heat_radius")]
    pub heat_radius: f64,
    #[serde(default = "default_heat_blur")]
    pub heat_blur: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            marker_radius: default_marker_radius(),
            heat_radius: default_heat_radius(),
            heat_blur: default_heat_blur(),
            max_zoom: default_max_zoom(),
        }
    }
}

fn default_marker_radius() -> f64 {
    DisplayParameters::default().marker_radius()
}

fn default_heat_radius() -> f64 {
    DisplayParameters::default().heat_radius()
}

fn default_heat_blur() -> f64 {
    DisplayParameters::default().heat_blur()
}

fn default_max_zoom() -> u8 {
    DEFAULT_MAX_ZOOM
}

/// Initial layer visibility.
#[derive(Debug, Clone, Deserialize)]
pub struct TogglesConfig {
    #[serde(default = "default_enabled")]
    pub show_markers: bool,
    #[serde(default = "default_enabled")]
    pub show_density: bool,
}

impl Default for TogglesConfig {
    fn default() -> Self {
        Self {
            show_markers: true,
            show_density: true,
        }
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewportConfig {
    /// Margin added to each side when fitting the view to the data.
    #[serde(default = "default_pad_fraction")]
    pub pad_fraction: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            pad_fraction: default_pad_fraction(),
        }
    }
}

fn default_pad_fraction() -> f64 {
    DEFAULT_PAD_FRACTION
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    8090
}

impl ViewerConfig {
    /// Load from a YAML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), source = %config.data.source, "Loaded viewer config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes to null, not to an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Validate and convert to the settings the viewer runs with.
    pub fn viewer_settings(&self) -> Result<ViewerSettings> {
        let params = DisplayParameters::new(
            self.display.marker_radius,
            self.display.heat_radius,
            self.display.heat_blur,
        )
        .context("Invalid display configuration")?;

        let pad_fraction = self.viewport.pad_fraction;
        if !pad_fraction.is_finite() || pad_fraction < 0.0 {
            bail!(
                "Invalid viewport configuration: pad_fraction must be >= 0, got {}",
                pad_fraction
            );
        }

        if self.data.weight_field.trim().is_empty() {
            bail!("Invalid data configuration: weight_field must not be empty");
        }

        Ok(ViewerSettings {
            normalizer: Normalizer::new(self.data.weight_field.clone()),
            pad_fraction,
            max_zoom: self.display.max_zoom,
            params,
            toggles: ToggleState::new(self.toggles.show_markers, self.toggles.show_density),
        })
    }
}
