//! TOML configuration for widgets.
//!
//! ```toml
//! values = ["a", "b", "c"]
//! current_index = 1
//! highlight_color = [1.0, 0.2, 0.2, 1.0]
//!
//! [geometry]
//! x = 300.0
//! y = 290.0
//! width = 200.0
//! height = 20.0
//! ```
//!
//! Colors are straight-alpha RGBA with every channel in `0.0..=1.0`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use trellis_core::logging::targets;
use trellis_render::{Color, Rect};

use crate::error::{ConfigError, Result};
use crate::widget::Widget;
use crate::widget::widgets::ComboBox;

/// A widget rectangle in parent coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<GeometryConfig> for Rect {
    fn from(geometry: GeometryConfig) -> Self {
        Rect::new(geometry.x, geometry.y, geometry.width, geometry.height)
    }
}

/// Settings for a [`ComboBox`].
///
/// Every field is optional in TOML; missing fields take the defaults of a
/// freshly created combo box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComboBoxConfig {
    pub values: Vec<String>,
    pub current_index: usize,
    /// Text color, also used for options that are not highlighted.
    pub color: [f32; 4],
    pub highlight_color: [f32; 4],
    pub background_color: [f32; 4],
    /// Falls back to the combo box's size hint at the origin.
    pub geometry: Option<GeometryConfig>,
}

impl Default for ComboBoxConfig {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            current_index: 0,
            color: Color::WHITE.to_array(),
            highlight_color: Color::WHITE.to_array(),
            background_color: Color::DARK_GRAY.to_array(),
            geometry: None,
        }
    }
}

impl ComboBoxConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            values = config.values.len(),
            "loaded combo box configuration"
        );
        Ok(config)
    }

    /// Check colors, geometry and the selected index.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (name, color) in [
            ("color", self.color),
            ("highlight_color", self.highlight_color),
            ("background_color", self.background_color),
        ] {
            if !Color::from(color).is_normalized() {
                return Err(ConfigError::Invalid(format!(
                    "{name} channels must lie in 0.0..=1.0, got {color:?}"
                )));
            }
        }

        if let Some(geometry) = self.geometry {
            let finite = [geometry.x, geometry.y, geometry.width, geometry.height]
                .iter()
                .all(|v| v.is_finite());
            if !finite || geometry.width < 0.0 || geometry.height < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "geometry must be finite with a non-negative size, got {geometry:?}"
                )));
            }
        }

        let len = self.values.len();
        if self.current_index >= len && !(len == 0 && self.current_index == 0) {
            return Err(ConfigError::Invalid(format!(
                "current_index {} is out of range for {len} values",
                self.current_index
            )));
        }
        Ok(())
    }
}

impl ComboBox {
    /// Build a combo box from validated settings.
    pub fn from_config(config: &ComboBoxConfig) -> Result<Self> {
        config.validate()?;
        let mut combo = ComboBox::new(config.values.iter().cloned())
            .with_color(config.color.into())
            .with_highlight_color(config.highlight_color.into())
            .with_background_color(config.background_color.into())
            .with_current_index(config.current_index)?;

        let geometry = match config.geometry {
            Some(geometry) => geometry.into(),
            None => {
                let size = combo.size_hint().preferred;
                Rect::new(0.0, 0.0, size.width, size.height)
            }
        };
        combo.set_geometry(geometry);
        Ok(combo)
    }
}
