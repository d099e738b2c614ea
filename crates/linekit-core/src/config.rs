//! Interaction tolerances and defaults for the editor.

use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Editor configuration. All distances are in canvas units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Width of the stroke envelope used for hit testing.
    pub hit_width: f64,
    /// Radius around a line point that starts a point drag.
    pub grab_radius: f64,
    /// Radius of the move and rotate icons.
    pub handle_radius: f64,
    /// Offset of the move icon from the anchor box.
    pub move_handle_offset: Vec2,
    /// Offset of the rotate icon from the anchor box.
    pub rotate_handle_offset: Vec2,
    /// Offset of an elbow's delete button from the elbow.
    pub delete_button_offset: Vec2,
    pub delete_button_radius: f64,
    /// Radius for ctrl-click elbow deletion.
    pub ctrl_delete_radius: f64,
    /// Maximum segment distance for double-click elbow insertion.
    pub insert_radius: f64,
    /// Smallest stroke width a style update can set.
    pub min_stroke_width: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    pub default_color: String,
    pub default_width: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            hit_width: 20.0,
            grab_radius: 12.0,
            handle_radius: 15.0,
            move_handle_offset: Vec2::new(-25.0, -40.0),
            rotate_handle_offset: Vec2::new(25.0, -40.0),
            delete_button_offset: Vec2::new(20.0, -20.0),
            delete_button_radius: 12.0,
            ctrl_delete_radius: 10.0,
            insert_radius: 20.0,
            min_stroke_width: 0.5,
            min_zoom: 0.1,
            max_zoom: 2.0,
            zoom_step: 0.1,
            default_color: crate::shapes::DEFAULT_COLOR.to_string(),
            default_width: crate::shapes::DEFAULT_WIDTH,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        let radii = [
            ("hitWidth", self.hit_width),
            ("grabRadius", self.grab_radius),
            ("handleRadius", self.handle_radius),
            ("deleteButtonRadius", self.delete_button_radius),
            ("ctrlDeleteRadius", self.ctrl_delete_radius),
            ("insertRadius", self.insert_radius),
            ("minStrokeWidth", self.min_stroke_width),
            ("minZoom", self.min_zoom),
            ("zoomStep", self.zoom_step),
        ];
        for (field, value) in radii {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be a positive number, got {value}")));
            }
        }
        if !self.max_zoom.is_finite() || self.max_zoom < self.min_zoom {
            return Err(invalid(
                "maxZoom",
                format!("must be at least minZoom ({}), got {}", self.min_zoom, self.max_zoom),
            ));
        }
        if !self.default_width.is_finite() || self.default_width < self.min_stroke_width {
            return Err(invalid(
                "defaultWidth",
                format!("must be at least minStrokeWidth ({})", self.min_stroke_width),
            ));
        }
        if self.default_color.trim().is_empty() {
            return Err(invalid("defaultColor", "must not be empty".to_string()));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}
