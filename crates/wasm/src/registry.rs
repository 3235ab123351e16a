use tabpip_core::{CaptureError, ConfigError, Viewport};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("invalid viewport handle: {0}")]
    InvalidHandle(usize),
    #[error("{what} size must be finite and positive, got {width}x{height}")]
    InvalidSize {
        what: &'static str,
        width: f64,
        height: f64,
    },
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Live viewports, addressed by the index handed back to JS.
///
/// Detached slots are reused so a long-lived page that opens and closes the
/// PiP window repeatedly does not grow the table.
#[derive(Debug, Default)]
pub struct Registry {
    slots: Vec<Option<Viewport>>,
}

impl Registry {
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn attach(&mut self, viewport: Viewport) -> usize {
        if let Some(idx) = self.slots.iter().position(Option::is_none) {
            self.slots[idx] = Some(viewport);
            idx
        } else {
            self.slots.push(Some(viewport));
            self.slots.len() - 1
        }
    }

    pub fn detach(&mut self, handle: usize) -> Result<Viewport, BridgeError> {
        self.slots
            .get_mut(handle)
            .and_then(Option::take)
            .ok_or(BridgeError::InvalidHandle(handle))
    }

    pub fn get_mut(&mut self, handle: usize) -> Result<&mut Viewport, BridgeError> {
        self.slots
            .get_mut(handle)
            .and_then(Option::as_mut)
            .ok_or(BridgeError::InvalidHandle(handle))
    }

    #[cfg(test)]
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
