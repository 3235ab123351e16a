pub mod controller;
pub mod engine;
pub mod state;

pub use controller::Viewport;
pub use engine::{ViewportEngine, cursor_style_for};
pub use state::ViewportState;
