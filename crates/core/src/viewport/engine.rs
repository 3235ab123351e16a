use tabpip_protocol::{CursorStyle, Point, Size};

use crate::config::ViewportConfig;
use crate::viewport::state::ViewportState;

/// Pure pan/zoom transitions over a [`ViewportState`].
///
/// Every operation takes the current state plus the geometry it needs and
/// returns the next state. Nothing here fails: an operation whose
/// precondition does not hold (panning at fit scale, dragging without a
/// drag) returns the state unchanged.
///
/// After any operation:
/// - `min_scale <= scale <= max_scale`
/// - `scale <= 1.0` implies a zero translate
/// - otherwise `|tx| <= (scale - 1) * w / 2` and `|ty| <= (scale - 1) * h / 2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportEngine {
    min_scale: f64,
    max_scale: f64,
}

impl ViewportEngine {
    /// The limits are normalized so that `min_scale <= max_scale`.
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        Self {
            min_scale,
            max_scale,
        }
    }

    pub fn from_config(config: &ViewportConfig) -> Self {
        Self::new(config.min_scale, config.max_scale)
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Switch between fit (`1.0`) and the scale at which the surface shows
    /// at native pixel density. Translate is reset either way.
    pub fn toggle_fit_or_actual_size(
        &self,
        state: ViewportState,
        container: Size,
        surface: Size,
    ) -> ViewportState {
        let scale = if state.scale == 1.0 {
            let scale_x = surface.width / container.width;
            let scale_y = surface.height / container.height;
            scale_x.max(scale_y).max(1.0).min(self.max_scale)
        } else {
            1.0
        };
        ViewportState {
            scale,
            translate: Point::ZERO,
            ..state
        }
    }

    /// Change the scale by `delta_scale`, keeping the surface point under
    /// `cursor` stationary.
    ///
    /// `cursor` is relative to the untransformed surface centre, which is
    /// the container centre.
    pub fn zoom_at(
        &self,
        state: ViewportState,
        cursor: Point,
        delta_scale: f64,
        container: Size,
    ) -> ViewportState {
        let new_scale = (state.scale + delta_scale).clamp(self.min_scale, self.max_scale);
        if new_scale == state.scale {
            return state;
        }

        let k = new_scale / state.scale;
        let translate = Point::new(
            cursor.x - (cursor.x - state.translate.x) * k,
            cursor.y - (cursor.y - state.translate.y) * k,
        );
        self.clamp_translate(
            ViewportState {
                scale: new_scale,
                translate,
                ..state
            },
            container,
        )
    }

    /// Move the surface by `(dx, dy)` container pixels. No-op at fit scale.
    pub fn pan_by(&self, state: ViewportState, dx: f64, dy: f64, container: Size) -> ViewportState {
        if !state.is_zoomed() {
            return state;
        }
        let translate = Point::new(state.translate.x + dx, state.translate.y + dy);
        self.clamp_translate(ViewportState { translate, ..state }, container)
    }

    pub fn begin_drag(&self, state: ViewportState, pointer: Point) -> ViewportState {
        if !state.is_zoomed() || state.is_dragging {
            return state;
        }
        ViewportState {
            is_dragging: true,
            drag_anchor: pointer,
            drag_origin_translate: state.translate,
            ..state
        }
    }

    pub fn drag_to(&self, state: ViewportState, pointer: Point, container: Size) -> ViewportState {
        if !state.is_dragging {
            return state;
        }
        let translate = Point::new(
            state.drag_origin_translate.x + (pointer.x - state.drag_anchor.x),
            state.drag_origin_translate.y + (pointer.y - state.drag_anchor.y),
        );
        self.clamp_translate(ViewportState { translate, ..state }, container)
    }

    pub fn end_drag(&self, state: ViewportState) -> ViewportState {
        ViewportState {
            is_dragging: false,
            ..state
        }
    }

    /// Keep the scaled surface covering the container: no translate at or
    /// below fit, otherwise at most half the overhang on each axis.
    pub fn clamp_translate(&self, state: ViewportState, container: Size) -> ViewportState {
        if !state.is_zoomed() {
            return ViewportState {
                translate: Point::ZERO,
                ..state
            };
        }
        // A degenerate container (negative or NaN) pins translate to zero.
        let max_tx = ((state.scale - 1.0) * container.width / 2.0).max(0.0);
        let max_ty = ((state.scale - 1.0) * container.height / 2.0).max(0.0);
        ViewportState {
            translate: Point::new(
                state.translate.x.clamp(-max_tx, max_tx),
                state.translate.y.clamp(-max_ty, max_ty),
            ),
            ..state
        }
    }
}

impl Default for ViewportEngine {
    fn default() -> Self {
        Self::from_config(&ViewportConfig::default())
    }
}

/// Cursor hint for the current state.
pub fn cursor_style_for(state: &ViewportState) -> CursorStyle {
    if state.is_dragging {
        CursorStyle::Grabbing
    } else if state.is_zoomed() {
        CursorStyle::Grab
    } else {
        CursorStyle::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn engine() -> ViewportEngine {
        ViewportEngine::new(1.0, 4.0)
    }

    fn at_scale(scale: f64) -> ViewportState {
        ViewportState {
            scale,
            ..ViewportState::new()
        }
    }

    fn assert_clamped(engine: &ViewportEngine, state: &ViewportState, container: Size) {
        assert!(
            state.scale >= engine.min_scale() && state.scale <= engine.max_scale(),
            "scale {} out of range",
            state.scale
        );
        if state.scale <= 1.0 {
            assert_eq!(state.translate, Point::ZERO, "translate must be zero at fit");
        } else {
            let max_tx = (state.scale - 1.0) * container.width / 2.0;
            let max_ty = (state.scale - 1.0) * container.height / 2.0;
            assert!(state.translate.x.abs() <= max_tx + EPS, "tx {} > {max_tx}", state.translate.x);
            assert!(state.translate.y.abs() <= max_ty + EPS, "ty {} > {max_ty}", state.translate.y);
        }
    }

    #[test]
    fn fresh_state_is_fit() {
        let s = ViewportState::new();
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.translate, Point::ZERO);
        assert!(!s.is_dragging);
        assert_eq!(cursor_style_for(&s), CursorStyle::Default);
    }

    #[test]
    fn toggle_goes_to_actual_size_and_back() {
        let e = engine();
        let container = Size::new(480.0, 270.0);
        let surface = Size::new(1920.0, 1080.0);

        let zoomed = e.toggle_fit_or_actual_size(ViewportState::new(), container, surface);
        assert_eq!(zoomed.scale, 4.0);
        assert_eq!(zoomed.translate, Point::ZERO);

        let back = e.toggle_fit_or_actual_size(zoomed, container, surface);
        assert_eq!(back.scale, 1.0);
        assert_eq!(back.translate, Point::ZERO);
    }

    #[test]
    fn toggle_never_goes_below_fit_or_above_max() {
        let e = engine();
        let small = e.toggle_fit_or_actual_size(
            ViewportState::new(),
            Size::new(800.0, 600.0),
            Size::new(320.0, 240.0),
        );
        assert_eq!(small.scale, 1.0);

        let huge = e.toggle_fit_or_actual_size(
            ViewportState::new(),
            Size::new(480.0, 270.0),
            Size::new(7680.0, 4320.0),
        );
        assert_eq!(huge.scale, 4.0);
    }

    #[test]
    fn toggle_from_any_zoom_resets_translate() {
        let e = engine();
        let container = Size::new(480.0, 270.0);
        let s = ViewportState {
            scale: 2.5,
            translate: Point::new(100.0, -50.0),
            ..ViewportState::new()
        };
        let out = e.toggle_fit_or_actual_size(s, container, Size::new(1920.0, 1080.0));
        assert_eq!(out.scale, 1.0);
        assert_eq!(out.translate, Point::ZERO);
    }

    #[test]
    fn zoom_keeps_cursor_point_fixed() {
        let e = engine();
        let container = Size::new(480.0, 270.0);
        let start = ViewportState {
            scale: 2.0,
            translate: Point::new(20.0, -10.0),
            ..ViewportState::new()
        };
        let cursor = Point::new(30.0, 15.0);
        let out = e.zoom_at(start, cursor, 0.5, container);
        assert!((out.scale - 2.5).abs() < EPS);

        let k = out.scale / start.scale;
        assert!((out.translate.x + (cursor.x - start.translate.x) * k - cursor.x).abs() < EPS);
        assert!((out.translate.y + (cursor.y - start.translate.y) * k - cursor.y).abs() < EPS);
        assert_clamped(&e, &out, container);
    }

    #[test]
    fn zoom_at_boundary_is_a_noop() {
        let e = engine();
        let container = Size::new(480.0, 270.0);
        let fit = ViewportState::new();
        assert_eq!(e.zoom_at(fit, Point::new(50.0, 50.0), -0.5, container), fit);

        let max = ViewportState {
            scale: 4.0,
            translate: Point::new(100.0, 0.0),
            ..ViewportState::new()
        };
        assert_eq!(e.zoom_at(max, Point::new(10.0, 10.0), 1.0, container), max);
    }

    #[test]
    fn zoom_clamps_scale_and_translate() {
        let e = engine();
        let container = Size::new(480.0, 270.0);
        let out = e.zoom_at(ViewportState::new(), Point::new(240.0, 135.0), 10.0, container);
        assert_eq!(out.scale, 4.0);
        assert_clamped(&e, &out, container);

        let back = e.zoom_at(out, Point::new(-200.0, 100.0), -10.0, container);
        assert_eq!(back.scale, 1.0);
        assert_eq!(back.translate, Point::ZERO);
    }

    #[test]
    fn pan_is_noop_at_fit() {
        let e = engine();
        let s = ViewportState::new();
        assert_eq!(e.pan_by(s, 50.0, 50.0, Size::new(480.0, 270.0)), s);
    }

    #[test]
    fn pan_saturates_at_overhang() {
        let e = engine();
        let container = Size::new(480.0, 270.0);
        let out = e.pan_by(at_scale(2.0), 1000.0, 1000.0, container);
        assert_eq!(out.translate, Point::new(240.0, 135.0));

        let mut s = at_scale(2.0);
        for _ in 0..20 {
            s = e.pan_by(s, -75.0, -40.0, container);
            assert_clamped(&e, &s, container);
        }
        assert_eq!(s.translate, Point::new(-240.0, -135.0));
    }

    #[test]
    fn drag_follows_pointer_from_snapshot() {
        let e = engine();
        let container = Size::new(480.0, 270.0);
        let start = ViewportState {
            scale: 2.0,
            translate: Point::new(10.0, 5.0),
            ..ViewportState::new()
        };
        let dragging = e.begin_drag(start, Point::new(100.0, 100.0));
        assert!(dragging.is_dragging);
        assert_eq!(cursor_style_for(&dragging), CursorStyle::Grabbing);

        let moved = e.drag_to(dragging, Point::new(130.0, 80.0), container);
        assert_eq!(moved.translate, Point::new(40.0, -15.0));

        // Later moves are measured from the anchor, not the previous move.
        let moved = e.drag_to(moved, Point::new(90.0, 100.0), container);
        assert_eq!(moved.translate, Point::new(0.0, 5.0));

        let ended = e.end_drag(moved);
        assert!(!ended.is_dragging);
        assert_eq!(ended.translate, moved.translate);
        assert_eq!(cursor_style_for(&ended), CursorStyle::Grab);
    }

    #[test]
    fn drag_is_clamped() {
        let e = engine();
        let container = Size::new(480.0, 270.0);
        let s = e.begin_drag(at_scale(2.0), Point::new(0.0, 0.0));
        let s = e.drag_to(s, Point::new(5000.0, -5000.0), container);
        assert_eq!(s.translate, Point::new(240.0, -135.0));
    }

    #[test]
    fn drag_needs_zoom_and_an_active_drag() {
        let e = engine();
        let container = Size::new(480.0, 270.0);
        let fit = ViewportState::new();
        assert_eq!(e.begin_drag(fit, Point::new(1.0, 1.0)), fit);
        assert_eq!(e.drag_to(fit, Point::new(50.0, 50.0), container), fit);

        let zoomed = at_scale(2.0);
        assert_eq!(e.drag_to(zoomed, Point::new(50.0, 50.0), container), zoomed);
    }

    #[test]
    fn second_begin_keeps_first_anchor() {
        let e = engine();
        let s = e.begin_drag(at_scale(3.0), Point::new(10.0, 10.0));
        let again = e.begin_drag(s, Point::new(99.0, 99.0));
        assert_eq!(again.drag_anchor, Point::new(10.0, 10.0));
    }

    #[test]
    fn clamp_zeroes_translate_below_fit() {
        let e = ViewportEngine::new(0.5, 4.0);
        let s = ViewportState {
            scale: 0.75,
            translate: Point::new(3.0, 4.0),
            ..ViewportState::new()
        };
        assert_eq!(
            e.clamp_translate(s, Size::new(100.0, 100.0)).translate,
            Point::ZERO
        );
    }

    #[test]
    fn degenerate_container_pins_translate() {
        let e = ViewportEngine::default();
        let s = ViewportState {
            scale: 2.0,
            translate: Point::new(30.0, -20.0),
            ..ViewportState::new()
        };
        assert_eq!(
            e.clamp_translate(s, Size::new(-10.0, 270.0)).translate,
            Point::new(0.0, -20.0)
        );
        assert_eq!(
            e.clamp_translate(s, Size::new(f64::NAN, f64::NAN)).translate,
            Point::ZERO
        );
    }

    #[test]
    fn reversed_limits_are_normalized() {
        let e = ViewportEngine::new(4.0, 1.0);
        assert_eq!(e.min_scale(), 1.0);
        assert_eq!(e.max_scale(), 4.0);
    }

    #[test]
    fn mixed_gesture_sequence_holds_invariants() {
        let e = engine();
        let container = Size::new(640.0, 360.0);
        let mut s = ViewportState::new();
        let mut seed: u32 = 7;
        for step in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let a = f64::from(seed % 1000) - 500.0;
            let b = f64::from((seed / 1000) % 700) - 350.0;
            s = match step % 6 {
                0 => e.zoom_at(s, Point::new(a / 2.0, b / 2.0), a / 400.0, container),
                1 => e.pan_by(s, a, b, container),
                2 => e.begin_drag(s, Point::new(a, b)),
                3 => e.drag_to(s, Point::new(b, a), container),
                4 => e.end_drag(s),
                _ => e.toggle_fit_or_actual_size(s, container, Size::new(1920.0, 1080.0)),
            };
            assert_clamped(&e, &s, container);
        }
    }
}
