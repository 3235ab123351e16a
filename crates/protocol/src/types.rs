use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Centre of a box of this size whose origin is at (0, 0).
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The transform applied to the surface element: translate, then a uniform
/// scale around the element's centre.
///
/// This is the only thing the embedding layer needs to paint a viewport;
/// it maps directly onto a CSS `transform` with `transform-origin: center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub translate: Point,
    pub scale: f64,
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        translate: Point::ZERO,
        scale: 1.0,
    };

    /// Render as a CSS `transform` value.
    pub fn to_css(&self) -> String {
        // Adding 0.0 folds -0.0 into 0.0 so clamped values print cleanly.
        format!(
            "translate({}px, {}px) scale({})",
            self.translate.x + 0.0,
            self.translate.y + 0.0,
            self.scale,
        )
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
