//! Preset file format for flanger settings.
//!
//! A preset is a TOML file naming any subset of the eight flanger
//! parameters; missing entries keep their defaults.
//!
//! ```toml
//! name = "jet"
//! delay = 1.0
//! depth = 5.0
//! regen = 60.0
//! shape = "triangle"
//! ```

use anyhow::Context;
use flange_effects::{ConfigError, ParameterSet, parse_interpolation, parse_shape};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Preset file format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlangerPreset {
    /// Name of the preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base delay in ms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    /// Sweep depth in ms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    /// Feedback in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regen: Option<f64>,
    /// Wet mix in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Sweep rate in Hz
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Sweep shape keyword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    /// Channel phase spread in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<f64>,
    /// Interpolation keyword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interp: Option<String>,
}

impl FlangerPreset {
    /// Snapshot every parameter of `params`.
    pub fn from_params(name: Option<String>, params: &ParameterSet) -> Self {
        Self {
            name,
            description: None,
            delay: Some(params.delay_ms()),
            depth: Some(params.depth_ms()),
            regen: Some(params.feedback_pct()),
            width: Some(params.mix_pct()),
            speed: Some(params.speed_hz()),
            shape: Some(params.shape().keyword().to_string()),
            phase: Some(params.channel_phase_pct()),
            interp: Some(params.interpolation().keyword().to_string()),
        }
    }

    /// Validate into a parameter set, defaulting anything left out.
    pub fn to_params(&self) -> Result<ParameterSet, ConfigError> {
        let defaults = ParameterSet::default();
        let mut builder = ParameterSet::builder()
            .delay_ms(self.delay.unwrap_or(defaults.delay_ms()))
            .depth_ms(self.depth.unwrap_or(defaults.depth_ms()))
            .feedback_pct(self.regen.unwrap_or(defaults.feedback_pct()))
            .mix_pct(self.width.unwrap_or(defaults.mix_pct()))
            .speed_hz(self.speed.unwrap_or(defaults.speed_hz()))
            .channel_phase_pct(self.phase.unwrap_or(defaults.channel_phase_pct()));
        if let Some(shape) = &self.shape {
            builder = builder.shape(parse_shape(shape)?);
        }
        if let Some(interp) = &self.interp {
            builder = builder.interpolation(parse_interpolation(interp)?);
        }
        builder.build()
    }

    /// Parse a preset from TOML text.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Render as TOML text.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a preset file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading preset {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing preset {}", path.display()))
    }

    /// Write the preset to `path`.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.to_toml()?)
            .with_context(|| format!("writing preset {}", path.display()))
    }
}
