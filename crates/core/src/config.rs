use serde::{Deserialize, Serialize};
use tabpip_protocol::Size;
use thiserror::Error;

pub const DEFAULT_MIN_SCALE: f64 = 1.0;
pub const DEFAULT_MAX_SCALE: f64 = 4.0;
/// Scale change per pixel of wheel delta.
pub const DEFAULT_WHEEL_SENSITIVITY: f64 = 0.01;
/// The PiP window size requested from the host when nothing else is known.
pub const DEFAULT_WINDOW_WIDTH: f64 = 480.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 270.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("scale range must satisfy 0 < minScale <= 1 <= maxScale, got {min}..{max}")]
    ScaleRange { min: f64, max: f64 },
    #[error("wheelSensitivity must be positive, got {0}")]
    WheelSensitivity(f64),
    #[error("window box must be positive, got {width}x{height}")]
    WindowBox { width: f64, height: f64 },
}

/// Tunables for one viewport. Every field has a default, so an empty JSON
/// object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub wheel_sensitivity: f64,
    pub window: WindowConfig,
}

/// Bounding box for the floating window, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowConfig {
    pub max_width: f64,
    pub max_height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            wheel_sensitivity: DEFAULT_WHEEL_SENSITIVITY,
            window: WindowConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_WINDOW_WIDTH,
            max_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl WindowConfig {
    pub fn max_size(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }
}

impl ViewportConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(data)?;
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "rejected viewport config");
            return Err(e);
        }
        Ok(config)
    }

    /// The fresh state starts at scale 1.0, so the range has to contain it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("minScale", self.min_scale),
            ("maxScale", self.max_scale),
            ("wheelSensitivity", self.wheel_sensitivity),
            ("window.maxWidth", self.window.max_width),
            ("window.maxHeight", self.window.max_height),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        if !(self.min_scale > 0.0 && self.min_scale <= 1.0 && self.max_scale >= 1.0) {
            return Err(ConfigError::ScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if self.wheel_sensitivity <= 0.0 {
            return Err(ConfigError::WheelSensitivity(self.wheel_sensitivity));
        }
        if self.window.max_width <= 0.0 || self.window.max_height <= 0.0 {
            return Err(ConfigError::WindowBox {
                width: self.window.max_width,
                height: self.window.max_height,
            });
        }
        Ok(())
    }
}
