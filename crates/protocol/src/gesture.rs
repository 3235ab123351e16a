use serde::{Deserialize, Serialize};

/// Keyboard modifiers held while a gesture happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Whether the wheel should zoom instead of scroll.
    ///
    /// Ctrl on Windows/Linux, Cmd on macOS. Browsers also report trackpad
    /// pinch as a ctrl+wheel event.
    pub fn zoom(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
    Other,
}

/// A discrete input gesture, already translated out of host-specific event
/// types. Positions are container-local pixels.
///
/// Renderers and embedders produce these; the core consumes them one at a
/// time and never sees a raw host event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Gesture {
    /// Double click / double tap.
    DoubleActivate { x: f64, y: f64 },

    /// Wheel or trackpad scroll. Deltas are in pixels, positive `delta_y`
    /// meaning "scroll down".
    #[serde(rename_all = "camelCase")]
    Wheel {
        x: f64,
        y: f64,
        delta_x: f64,
        delta_y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },

    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },

    PointerMove { x: f64, y: f64 },

    PointerUp { x: f64, y: f64 },

    /// The host aborted the pointer sequence (lost capture, touch cancel).
    PointerCancel,

    PointerEnter { x: f64, y: f64 },

    PointerLeave,
}
