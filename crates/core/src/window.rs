use tabpip_protocol::Size;

use crate::config::WindowConfig;

/// Largest size inside `max` with the surface's aspect ratio.
///
/// Wider-than-box surfaces are width-bound, everything else height-bound.
/// The free dimension is rounded to whole pixels. `surface.height` must be
/// non-zero.
pub fn initial_window_size(surface: Size, max: Size) -> Size {
    if surface.aspect_ratio() > max.aspect_ratio() {
        Size::new(
            max.width,
            (max.width * surface.height / surface.width).round(),
        )
    } else {
        Size::new(
            (max.height * surface.width / surface.height).round(),
            max.height,
        )
    }
}

/// Size to ask the floating-window host for.
///
/// Falls back to the configured box when the surface has not reported its
/// dimensions yet.
pub fn pip_window_request(surface: Option<Size>, window: &WindowConfig) -> Size {
    match surface {
        Some(surface) if surface.width > 0.0 && surface.height > 0.0 => {
            initial_window_size(surface, window.max_size())
        }
        _ => window.max_size(),
    }
}
