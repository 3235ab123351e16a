pub mod capture;
pub mod config;
pub mod viewport;
pub mod window;

pub use capture::CaptureError;
pub use config::{ConfigError, ViewportConfig, WindowConfig};
pub use viewport::{Viewport, ViewportEngine, ViewportState};
pub use window::{initial_window_size, pip_window_request};
