pub mod cursor;
pub mod gesture;
pub mod messages;
pub mod types;

pub use cursor::CursorStyle;
pub use gesture::{Gesture, Modifiers, PointerButton};
pub use messages::{CaptureOutcome, ExtensionRequest, StreamIdResponse};
pub use types::{Point, Size, ViewTransform};
