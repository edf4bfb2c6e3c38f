//! Scene settings
//!
//! Every tunable of the visualization lives here, defaulting to the
//! constants in `consts`. Settings are read-only at runtime: loaded from JSON (a
//! file on native, LocalStorage on web) and never written back.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Which circle takes a press that lands inside both grab zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PressPrecedence {
    /// Occluder wins overlapping presses
    #[default]
    OccluderFirst,
    LightFirst,
}

impl PressPrecedence {
    pub fn as_str(&self) -> &'static str {
        match self {
            PressPrecedence::OccluderFirst => "OccluderFirst",
            PressPrecedence::LightFirst => "LightFirst",
        }
    }
}

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("{name} radius must be positive and finite, got {value}")]
    InvalidRadius { name: &'static str, value: f32 },

    #[error("{name} center must be finite, got ({x}, {y})")]
    InvalidCenter { name: &'static str, x: f32, y: f32 },

    #[error("ray count must be at least 1")]
    ZeroRayCount,

    #[error("ray count {0} exceeds the maximum of {max}", max = MAX_RAY_COUNT)]
    TooManyRays(u32),

    #[error("far distance must be positive and finite, got {0}")]
    InvalidFarDistance(f32),

    #[error("max shadow ratio must lie in (0, 1), got {0}")]
    InvalidShadowRatio(f32),

    #[error("hit-test buffer must be non-negative and finite, got {0}")]
    InvalidHitTestBuffer(f32),

    #[error("light and occluder start overlapping (distance {distance}, minimum {limit})")]
    InitialOverlap { distance: f32, limit: f32 },
}

/// Scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Scene ===
    /// Starting center of the light
    pub light_center: Vec2,
    /// Light radius
    pub light_radius: f32,
    /// Starting center of the occluder
    pub occluder_center: Vec2,
    /// Occluder radius
    pub occluder_radius: f32,

    // === Rays ===
    /// Rays sampled evenly over the full circle
    pub ray_count: u32,
    /// Length of rays outside the shadow cone
    pub far_distance: f32,
    /// Clamp applied to radius/distance before taking asin
    pub max_shadow_ratio: f32,

    // === Interaction ===
    /// Extra grab radius around each circle
    pub hit_test_buffer: f32,
    /// Tie-break for presses inside both grab zones
    pub press_precedence: PressPrecedence,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            light_center: Vec2::from(LIGHT_START),
            light_radius: LIGHT_RADIUS,
            occluder_center: Vec2::from(OCCLUDER_START),
            occluder_radius: OCCLUDER_RADIUS,

            ray_count: RAY_COUNT,
            far_distance: FAR_DISTANCE,
            max_shadow_ratio: MAX_SHADOW_RATIO,

            hit_test_buffer: HIT_TEST_BUFFER,
            press_precedence: PressPrecedence::OccluderFirst,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings describe a usable scene
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, center) in [("light", self.light_center), ("occluder", self.occluder_center)] {
            if !center.is_finite() {
                return Err(SettingsError::InvalidCenter {
                    name,
                    x: center.x,
                    y: center.y,
                });
            }
        }
        for (name, value) in [("light", self.light_radius), ("occluder", self.occluder_radius)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::InvalidRadius { name, value });
            }
        }
        if self.ray_count == 0 {
            return Err(SettingsError::ZeroRayCount);
        }
        if self.ray_count > MAX_RAY_COUNT {
            return Err(SettingsError::TooManyRays(self.ray_count));
        }
        if !(self.far_distance.is_finite() && self.far_distance > 0.0) {
            return Err(SettingsError::InvalidFarDistance(self.far_distance));
        }
        if !(self.max_shadow_ratio > 0.0 && self.max_shadow_ratio < 1.0) {
            return Err(SettingsError::InvalidShadowRatio(self.max_shadow_ratio));
        }
        if !(self.hit_test_buffer.is_finite() && self.hit_test_buffer >= 0.0) {
            return Err(SettingsError::InvalidHitTestBuffer(self.hit_test_buffer));
        }

        let distance = self.light_center.distance(self.occluder_center);
        let limit = self.light_radius + self.occluder_radius;
        if distance < limit {
            return Err(SettingsError::InitialOverlap { distance, limit });
        }
        Ok(())
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "shadow_cone_settings";

    /// Load settings from LocalStorage (WASM only), falling back to defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}
