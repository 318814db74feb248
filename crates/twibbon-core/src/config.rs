//! Editor configuration.
//!
//! Every field has a default, so hosts only pass what they want to change.
//! From JavaScript this is a plain object deserialized via serde; missing
//! fields fall back to the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::InterpolationFilter;
use crate::viewport::Viewport;

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A size field is zero.
    #[error("Invalid configuration: {field} must be greater than zero")]
    ZeroSize { field: &'static str },
}

/// Tunables for an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// On-screen canvas width in pixels.
    pub viewport_width: u32,
    /// On-screen canvas height in pixels.
    pub viewport_height: u32,
    /// Side of the square export in pixels.
    pub export_size: u32,
    /// Overlay opacity while the user is dragging or pinching.
    pub interaction_opacity: f32,
    /// Quiet period before the overlay fades back in.
    pub restore_delay_ms: f64,
    /// Opacity of the placeholder shown before a photo is loaded.
    pub placeholder_opacity: f32,
    /// Seconds between pressing download and the export being produced.
    pub countdown_secs: u32,
    /// Text the host rasterizes into the watermark stamp. Empty disables
    /// the watermark requirement.
    pub watermark_text: String,
    /// Distance of the watermark from the bottom-right corner, in export pixels.
    pub watermark_margin: u32,
    /// Watermark opacity.
    pub watermark_opacity: f32,
    /// Suggested file name for the exported PNG.
    pub export_file_name: String,
    /// Interpolation used for scaled draws.
    pub filter: InterpolationFilter,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport_width: 500,
            viewport_height: 500,
            export_size: 1080,
            interaction_opacity: 0.5,
            restore_delay_ms: 300.0,
            placeholder_opacity: 0.5,
            countdown_secs: 15,
            watermark_text: "#XTCODES".to_string(),
            watermark_margin: 20,
            watermark_opacity: 0.8,
            export_file_name: "twibboned-image-HD.png".to_string(),
            filter: InterpolationFilter::Bilinear,
        }
    }
}

impl EditorConfig {
    /// Check the configuration for values the session cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("export_size", self.export_size),
        ];
        for (field, value) in sizes {
            if value == 0 {
                return Err(ConfigError::ZeroSize { field });
            }
        }
        Ok(())
    }

    /// Canvas dimensions described by this configuration.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height, self.export_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = EditorConfig::default();
        assert_eq!(config.export_size, 1080);
        assert_eq!(config.interaction_opacity, 0.5);
        assert_eq!(config.restore_delay_ms, 300.0);
        assert_eq!(config.countdown_secs, 15);
        assert_eq!(config.export_file_name, "twibboned-image-HD.png");
        assert_eq!(config.watermark_text, "#XTCODES");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let mut config = EditorConfig::default();
        config.export_size = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroSize {
                field: "export_size"
            })
        );

        let mut config = EditorConfig::default();
        config.viewport_width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_viewport() {
        let mut config = EditorConfig::default();
        config.viewport_width = 400;
        config.viewport_height = 300;
        assert_eq!(config.viewport(), Viewport::new(400, 300, 1080));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::ZeroSize {
            field: "viewport_height",
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration: viewport_height must be greater than zero"
        );
    }
}
