//! Capture target checks and the messages shown when capture fails.
//!
//! The capture itself (stream ids, `getUserMedia`, the PiP window) is done
//! by the browser; this module only decides whether to try and what to tell
//! the user when it does not work.

use tabpip_protocol::{CaptureOutcome, ExtensionRequest, StreamIdResponse};
use thiserror::Error;

/// URL prefixes of pages the browser refuses to capture.
const RESTRICTED_PREFIXES: &[&str] = &["chrome://"];

/// Shown when something other than an `Error` object was thrown.
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Document PiP API is not supported in this browser.")]
    Unsupported,
    #[error("No active tab found.")]
    NoActiveTab,
    #[error("Cannot open PiP on chrome:// pages.")]
    RestrictedPage,
    #[error("No tab ID provided")]
    MissingTabId,
    /// The host or the capture script refused; its message is shown as-is.
    #[error("{0}")]
    Denied(String),
    /// The capture script finished without reporting an outcome.
    #[error("Failed to open PiP window.")]
    NoOutcome,
    #[error("Failed to open PiP window: {0}")]
    Failed(String),
}

/// Check the active tab before injecting the capture script.
pub fn check_capture_target(tab_id: Option<u32>, url: Option<&str>) -> Result<u32, CaptureError> {
    let Some(tab_id) = tab_id else {
        return Err(CaptureError::NoActiveTab);
    };
    if url.is_some_and(is_restricted_url) {
        tracing::debug!(tab_id, "refusing to capture restricted page");
        return Err(CaptureError::RestrictedPage);
    }
    Ok(tab_id)
}

pub fn is_restricted_url(url: &str) -> bool {
    RESTRICTED_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

/// Tab the background worker should request a stream id for.
pub fn requested_tab(request: &ExtensionRequest) -> Result<u32, CaptureError> {
    match request {
        ExtensionRequest::GetMediaStreamId { tab_id } => tab_id.ok_or(CaptureError::MissingTabId),
    }
}

/// Message for a caught exception. `None` stands for a thrown value that is
/// not an `Error`.
pub fn caught_message(message: Option<String>) -> String {
    message.unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

/// Combine the two halves of the tab-capture callback: the stream id and
/// the runtime's last error, which wins when both are set.
pub fn tab_capture_result(
    stream_id: Option<String>,
    last_error: Option<String>,
) -> Result<String, CaptureError> {
    match (stream_id, last_error) {
        (_, Some(error)) => Err(CaptureError::Denied(error)),
        (Some(stream_id), None) => Ok(stream_id),
        (None, None) => Err(CaptureError::Denied(UNKNOWN_ERROR.to_string())),
    }
}

pub fn stream_id_response(result: Result<String, CaptureError>) -> StreamIdResponse {
    match result {
        Ok(stream_id) => StreamIdResponse::Ok { stream_id },
        Err(e) => StreamIdResponse::Err {
            error: e.to_string(),
        },
    }
}

/// Read the background worker's reply on the capture-script side.
pub fn stream_id_from_response(response: StreamIdResponse) -> Result<String, CaptureError> {
    response.into_result().map_err(CaptureError::Denied)
}

pub fn capture_outcome(result: Result<(), CaptureError>) -> CaptureOutcome {
    match result {
        Ok(()) => CaptureOutcome::ok(),
        Err(e) => CaptureOutcome::failed(e.to_string()),
    }
}

/// Popup side of [`capture_outcome`]. A missing outcome means the injected
/// script never returned one.
pub fn outcome_error(outcome: Option<CaptureOutcome>) -> Result<(), CaptureError> {
    match outcome {
        Some(CaptureOutcome { success: true, .. }) => Ok(()),
        Some(CaptureOutcome {
            error: Some(error), ..
        }) => Err(CaptureError::Denied(error)),
        Some(_) | None => Err(CaptureError::NoOutcome),
    }
}
