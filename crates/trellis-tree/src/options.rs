//! Options for running layout over an element tree.

use tracing::warn;
use trellis_core::{OptionsError, Size};

/// DPI at which one DIP is exactly one device pixel.
pub const BASE_DPI: f64 = 96.0;

/// Options for layout computation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct LayoutOptions {
    /// Width of the root viewport in DIPs
    pub viewport_width: f64,
    /// Height of the root viewport in DIPs
    pub viewport_height: f64,
    /// Horizontal DIPs per device pixel
    pub scale_x: f64,
    /// Vertical DIPs per device pixel
    pub scale_y: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl LayoutOptions {
    /// Set the viewport size.
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the DIP-per-pixel scale on both axes.
    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    /// Derive the scale from the monitor DPI.
    pub fn with_dpi(self, dpi_x: f64, dpi_y: f64) -> Self {
        self.with_scale(BASE_DPI / dpi_x, BASE_DPI / dpi_y)
    }

    pub fn viewport(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }

    /// Check that the viewport is finite and non-negative and that both
    /// scales are finite and positive.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let viewport = self.viewport();
        if !viewport.is_finite() || viewport.width < 0.0 || viewport.height < 0.0 {
            warn!(
                width = self.viewport_width,
                height = self.viewport_height,
                "rejecting layout options"
            );
            return Err(OptionsError::InvalidViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }

        for scale in [self.scale_x, self.scale_y] {
            if !scale.is_finite() || scale <= 0.0 {
                warn!(scale, "rejecting layout options");
                return Err(OptionsError::InvalidScale { scale });
            }
        }
        Ok(())
    }

    /// Parse and validate options from JSON. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }
}
