use serde::{Deserialize, Serialize};

/// Pointer cursor the embedder should show over the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorStyle {
    #[default]
    Default,
    Grab,
    Grabbing,
}

impl CursorStyle {
    /// CSS `cursor` property value.
    pub fn css_name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}
