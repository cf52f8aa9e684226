use std::fs;
use std::path::{Path, PathBuf};

use actorx_world::LightKind;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Adjustments at or below this turn a light kind off entirely.
pub const LIGHT_CUTOFF: f32 = 0.0001;

pub const MIN_RESIZE_BY: f32 = 0.01;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid field `{0}`: {1}")]
    Invalid(&'static str, String),
}

/// Options for one import. Every field has a default, so an empty TOML file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// Global scale applied to meshes and landscape tiles.
    pub resize_by: f32,
    /// Point lights.
    pub adjust_intensity: f32,
    pub adjust_area_intensity: f32,
    pub adjust_spot_intensity: f32,
    pub adjust_sun_intensity: f32,
    /// Skip landscape entries whose centre offset is positive on every axis.
    pub skip_offcenter: bool,
    /// Asset root. When unset the root is searched for next to the input file.
    #[serde(deserialize_with = "empty_path_is_none")]
    pub base_game_dir: Option<PathBuf>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            resize_by: 0.01,
            adjust_intensity: 0.05,
            adjust_area_intensity: 0.01,
            adjust_spot_intensity: 0.0025,
            adjust_sun_intensity: 0.001,
            skip_offcenter: true,
            base_game_dir: None,
        }
    }
}

impl ImportConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ImportConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_min("resize_by", self.resize_by, MIN_RESIZE_BY)?;
        check_min("adjust_intensity", self.adjust_intensity, 0.0)?;
        check_min("adjust_area_intensity", self.adjust_area_intensity, 0.0)?;
        check_min("adjust_spot_intensity", self.adjust_spot_intensity, 0.0)?;
        check_min("adjust_sun_intensity", self.adjust_sun_intensity, 0.0)?;
        Ok(())
    }

    pub fn intensity_for(&self, kind: LightKind) -> f32 {
        match kind {
            LightKind::Sun => self.adjust_sun_intensity,
            LightKind::Point => self.adjust_intensity,
            LightKind::Spot => self.adjust_spot_intensity,
            LightKind::Area => self.adjust_area_intensity,
        }
    }

    pub fn light_enabled(&self, kind: LightKind) -> bool {
        self.intensity_for(kind) > LIGHT_CUTOFF
    }
}

fn check_min(field: &'static str, value: f32, min: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::Invalid(field, format!("{value} is not finite")));
    }
    if value < min {
        return Err(ConfigError::Invalid(
            field,
            format!("{value} is below the minimum of {min}"),
        ));
    }
    Ok(())
}

fn empty_path_is_none<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from))
}
