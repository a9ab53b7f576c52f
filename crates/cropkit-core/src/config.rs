//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! edge_margin = 40.0
//! reset_inset = 100.0
//! preview_filter = "Bilinear"
//!
//! [post_target]
//! width = 1080
//! height = 1350
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aspect::POST_RATIO;
use crate::decode::FilterType;

/// Errors raised while loading an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid TOML or has mistyped fields.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field parsed but holds a value the engine cannot work with.
    #[error("Invalid config value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Output resolution for portrait post crops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl Default for TargetSize {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1350,
        }
    }
}

/// Tunables for the crop engine and renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hit-test padding around the rect edges, in canvas units.
    pub edge_margin: f32,
    /// Space left around the rect when it is reset in post/square mode.
    pub reset_inset: f32,
    /// Output size for post crops. Crops smaller than this are not upscaled.
    pub post_target: TargetSize,
    /// Resampling filter shared by the preview and the final render.
    pub preview_filter: FilterType,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            edge_margin: 40.0,
            reset_inset: 100.0,
            post_target: TargetSize::default(),
            preview_filter: FilterType::Bilinear,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Smallest width and height the rect may shrink to.
    #[inline]
    pub fn min_size(&self) -> f32 {
        3.0 * self.edge_margin
    }

    /// Check every field against what the engine can work with.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidValue` naming the first offending field: a
    /// non-positive or non-finite `edge_margin`, a negative `reset_inset`, or a
    /// `post_target` that is empty or not 4:5.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.edge_margin.is_finite() && self.edge_margin > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "edge_margin",
                reason: format!("must be a positive number, got {}", self.edge_margin),
            });
        }
        if !(self.reset_inset.is_finite() && self.reset_inset >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "reset_inset",
                reason: format!("must be zero or positive, got {}", self.reset_inset),
            });
        }
        if self.post_target.width == 0 || self.post_target.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "post_target",
                reason: format!(
                    "dimensions must be non-zero, got {}x{}",
                    self.post_target.width, self.post_target.height
                ),
            });
        }
        let (width, height) = (self.post_target.width, self.post_target.height);
        if (height as f32 * POST_RATIO - width as f32).abs() > 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "post_target",
                reason: format!("must be 4:5 (width = height * 0.8), got {}x{}", width, height),
            });
        }
        Ok(())
    }
}
