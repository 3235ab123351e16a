//! JSON shapes exchanged between the extension popup, the injected capture
//! script and the background worker.

use serde::{Deserialize, Serialize};

/// Requests handled by the background worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExtensionRequest {
    /// Ask for a tab-capture stream id usable by `getUserMedia`.
    #[serde(rename_all = "camelCase")]
    GetMediaStreamId {
        #[serde(default)]
        tab_id: Option<u32>,
    },
}

/// Reply to [`ExtensionRequest::GetMediaStreamId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamIdResponse {
    #[serde(rename_all = "camelCase")]
    Ok { stream_id: String },
    Err { error: String },
}

impl StreamIdResponse {
    pub fn into_result(self) -> Result<String, String> {
        match self {
            Self::Ok { stream_id } => Ok(stream_id),
            Self::Err { error } => Err(error),
        }
    }
}

/// Result the injected script reports back to the popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaptureOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}
