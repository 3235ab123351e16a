use tabpip_protocol::{CursorStyle, Gesture, Point, PointerButton, Size, ViewTransform};

use crate::config::ViewportConfig;
use crate::viewport::engine::{ViewportEngine, cursor_style_for};
use crate::viewport::state::ViewportState;

/// One attached surface inside one container.
///
/// This is the boundary where host input becomes engine calls: the embedder
/// translates its raw events into [`Gesture`]s, feeds them to
/// [`Viewport::handle`], and applies [`Viewport::transform`] and
/// [`Viewport::cursor`] to the surface element afterwards.
#[derive(Debug, Clone)]
pub struct Viewport {
    engine: ViewportEngine,
    wheel_sensitivity: f64,
    state: ViewportState,
    surface: Size,
    container: Size,
}

impl Viewport {
    /// Attach a surface with known intrinsic size. Starts at fit scale.
    pub fn attach(surface: Size, container: Size, config: &ViewportConfig) -> Self {
        tracing::debug!(
            surface_w = surface.width,
            surface_h = surface.height,
            container_w = container.width,
            container_h = container.height,
            "attached viewport"
        );
        Self {
            engine: ViewportEngine::from_config(config),
            wheel_sensitivity: config.wheel_sensitivity,
            state: ViewportState::new(),
            surface,
            container,
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn surface(&self) -> Size {
        self.surface
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn transform(&self) -> ViewTransform {
        self.state.transform()
    }

    pub fn cursor(&self) -> CursorStyle {
        cursor_style_for(&self.state)
    }

    /// Apply one gesture. Returns `true` when the gesture was consumed and
    /// the host must suppress its default scroll/zoom handling.
    pub fn handle(&mut self, gesture: &Gesture) -> bool {
        let before = self.state;
        let consumed = match *gesture {
            Gesture::DoubleActivate { .. } => {
                self.state = self.engine.toggle_fit_or_actual_size(
                    self.state,
                    self.container,
                    self.surface,
                );
                tracing::debug!(scale = self.state.scale, "toggled fit/actual size");
                true
            }
            Gesture::Wheel {
                x,
                y,
                delta_x,
                delta_y,
                modifiers,
            } => {
                if modifiers.zoom() {
                    let cursor = self.centered(x, y);
                    self.state = self.engine.zoom_at(
                        self.state,
                        cursor,
                        -delta_y * self.wheel_sensitivity,
                        self.container,
                    );
                    if self.state.scale != before.scale {
                        tracing::debug!(scale = self.state.scale, "wheel zoom");
                    }
                    true
                } else if self.state.is_zoomed() {
                    self.state = self
                        .engine
                        .pan_by(self.state, -delta_x, -delta_y, self.container);
                    true
                } else {
                    false
                }
            }
            Gesture::PointerDown { x, y, button } => {
                if button == PointerButton::Primary {
                    self.state = self.engine.begin_drag(self.state, Point::new(x, y));
                }
                self.state.is_dragging && !before.is_dragging
            }
            Gesture::PointerMove { x, y } => {
                self.state = self
                    .engine
                    .drag_to(self.state, Point::new(x, y), self.container);
                self.state.is_dragging
            }
            Gesture::PointerUp { .. } | Gesture::PointerCancel | Gesture::PointerLeave => {
                self.state = self.engine.end_drag(self.state);
                before.is_dragging
            }
            Gesture::PointerEnter { .. } => false,
        };

        if self.state.translate != before.translate {
            tracing::trace!(
                tx = self.state.translate.x,
                ty = self.state.translate.y,
                "translate changed"
            );
        }
        consumed
    }

    /// The host window was resized. Re-clamps so the translate never
    /// exposes empty space in the new container.
    pub fn resize(&mut self, container: Size) {
        if container == self.container {
            return;
        }
        self.container = container;
        self.state = self.engine.clamp_translate(self.state, container);
        tracing::debug!(
            container_w = container.width,
            container_h = container.height,
            "viewport resized"
        );
    }

    /// Map a container point back to the untransformed layout position of
    /// the surface that is currently drawn there.
    pub fn to_layout_point(&self, point: Point) -> Point {
        let center = self.container.center();
        let s = self.state.scale;
        Point::new(
            center.x + (point.x - center.x - self.state.translate.x) / s,
            center.y + (point.y - center.y - self.state.translate.y) / s,
        )
    }

    fn centered(&self, x: f64, y: f64) -> Point {
        let center = self.container.center();
        Point::new(x - center.x, y - center.y)
    }
}
