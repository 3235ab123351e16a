use serde::{Deserialize, Serialize};
use tabpip_protocol::{Point, ViewTransform};

/// Zoom/pan/drag state of one viewport.
///
/// Created fresh when a surface is attached and dropped on teardown. The
/// state is a plain value: engine operations take it by value and return
/// the next one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Uniform scale; `1.0` is the fit-to-container display.
    pub scale: f64,
    /// Offset of the surface centre in container pixels.
    pub translate: Point,
    pub is_dragging: bool,
    /// Pointer position when the current drag started.
    pub drag_anchor: Point,
    /// `translate` snapshot taken when the current drag started.
    pub drag_origin_translate: Point,
}

impl ViewportState {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            translate: Point::ZERO,
            is_dragging: false,
            drag_anchor: Point::ZERO,
            drag_origin_translate: Point::ZERO,
        }
    }

    /// Zoomed past fit; panning and dragging are only possible here.
    pub fn is_zoomed(&self) -> bool {
        self.scale > 1.0
    }

    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            translate: self.translate,
            scale: self.scale,
        }
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new()
    }
}
