mod registry;

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tabpip_core::capture::{self, check_capture_target as check_target};
use tabpip_core::{CaptureError, Viewport, ViewportConfig, pip_window_request};
use tabpip_protocol::{CaptureOutcome, ExtensionRequest, Gesture, Size, StreamIdResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::registry::{BridgeError, Registry};

static VIEWPORTS: Mutex<Registry> = Mutex::new(Registry::new());

fn viewports() -> MutexGuard<'static, Registry> {
    VIEWPORTS.lock().unwrap_or_else(|e| e.into_inner())
}

fn js_err(e: BridgeError) -> JsError {
    JsError::new(&e.to_string())
}

fn parse_config(config_json: Option<&str>) -> Result<ViewportConfig, BridgeError> {
    match config_json {
        Some(json) => Ok(ViewportConfig::from_json(json.as_bytes())?),
        None => Ok(ViewportConfig::default()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, BridgeError> {
    Ok(serde_json::to_string(value)?)
}

/// Sizes coming from JS must be finite and positive before they reach the
/// engine.
fn checked_size(what: &'static str, size: Size) -> Result<Size, BridgeError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(size.width) && valid(size.height) {
        Ok(size)
    } else {
        Err(BridgeError::InvalidSize {
            what,
            width: size.width,
            height: size.height,
        })
    }
}

fn attach(
    registry: &mut Registry,
    surface: Size,
    container: Size,
    config_json: Option<&str>,
) -> Result<usize, BridgeError> {
    let surface = checked_size("surface", surface)?;
    let container = checked_size("container", container)?;
    let config = parse_config(config_json)?;
    Ok(registry.attach(Viewport::attach(surface, container, &config)))
}

fn resize(registry: &mut Registry, handle: usize, container: Size) -> Result<(), BridgeError> {
    let container = checked_size("container", container)?;
    registry.get_mut(handle)?.resize(container);
    Ok(())
}

fn dispatch(registry: &mut Registry, handle: usize, gesture_json: &str) -> Result<bool, BridgeError> {
    let gesture: Gesture = serde_json::from_str(gesture_json)?;
    Ok(registry.get_mut(handle)?.handle(&gesture))
}

fn stream_reply(stream_id: Option<String>, last_error: Option<String>) -> Result<String, BridgeError> {
    to_json(&capture::stream_id_response(capture::tab_capture_result(
        stream_id, last_error,
    )))
}

fn stream_id_from(reply_json: &str) -> Result<String, BridgeError> {
    let response: StreamIdResponse = serde_json::from_str(reply_json)?;
    Ok(capture::stream_id_from_response(response)?)
}

fn outcome_json(result: Result<(), CaptureError>) -> Result<String, BridgeError> {
    to_json(&capture::capture_outcome(result))
}

fn outcome_message(json: Option<&str>) -> Result<Option<String>, BridgeError> {
    let outcome: Option<CaptureOutcome> = json.map(serde_json::from_str).transpose()?;
    Ok(capture::outcome_error(outcome).err().map(|e| e.to_string()))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Attach a viewport once the video reports its intrinsic size. Returns a
/// handle for the other calls. `config_json` is an optional
/// `ViewportConfig` object.
#[wasm_bindgen]
pub fn attach_viewport(
    surface_width: f64,
    surface_height: f64,
    container_width: f64,
    container_height: f64,
    config_json: Option<String>,
) -> Result<usize, JsError> {
    let handle = attach(
        &mut viewports(),
        Size::new(surface_width, surface_height),
        Size::new(container_width, container_height),
        config_json.as_deref(),
    )
    .map_err(js_err)?;
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(
        &format!(
            "tabpip: viewport {handle} attached ({surface_width}x{surface_height} in {container_width}x{container_height})"
        )
        .into(),
    );
    Ok(handle)
}

/// Drop a viewport when its PiP window closes.
#[wasm_bindgen]
pub fn detach_viewport(handle: usize) -> Result<(), JsError> {
    viewports().detach(handle).map_err(js_err)?;
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&format!("tabpip: viewport {handle} detached").into());
    Ok(())
}

/// Feed one gesture (JSON, see `Gesture`). Returns whether the caller
/// should `preventDefault()` the originating event.
#[wasm_bindgen]
pub fn dispatch_gesture(handle: usize, gesture_json: &str) -> Result<bool, JsError> {
    dispatch(&mut viewports(), handle, gesture_json).map_err(js_err)
}

#[wasm_bindgen]
pub fn resize_viewport(handle: usize, width: f64, height: f64) -> Result<(), JsError> {
    resize(&mut viewports(), handle, Size::new(width, height)).map_err(js_err)
}

/// CSS `transform` value for the video element.
#[wasm_bindgen]
pub fn viewport_transform_css(handle: usize) -> Result<String, JsError> {
    Ok(viewports()
        .get_mut(handle)
        .map_err(js_err)?
        .transform()
        .to_css())
}

/// CSS `cursor` value for the video element.
#[wasm_bindgen]
pub fn viewport_cursor(handle: usize) -> Result<String, JsError> {
    Ok(viewports()
        .get_mut(handle)
        .map_err(js_err)?
        .cursor()
        .css_name()
        .to_string())
}

/// Full viewport state as JSON, for debugging overlays.
#[wasm_bindgen]
pub fn viewport_state(handle: usize) -> Result<String, JsError> {
    let mut registry = viewports();
    let viewport = registry.get_mut(handle).map_err(js_err)?;
    to_json(viewport.state()).map_err(js_err)
}

/// Window size (JSON `{width, height}`) to pass to
/// `documentPictureInPicture.requestWindow`. Pass zeros when the video has
/// not loaded its metadata yet.
#[wasm_bindgen]
pub fn pip_window_size(
    surface_width: f64,
    surface_height: f64,
    config_json: Option<String>,
) -> Result<String, JsError> {
    let config = parse_config(config_json.as_deref()).map_err(js_err)?;
    let surface = Some(Size::new(surface_width, surface_height));
    let size = pip_window_request(surface, &config.window);
    to_json(&size).map_err(js_err)
}

/// Validate the active tab before injecting the capture script. Errors
/// carry the message to show in the popup.
#[wasm_bindgen]
pub fn check_capture_target(tab_id: Option<u32>, url: Option<String>) -> Result<u32, JsError> {
    check_target(tab_id, url.as_deref()).map_err(|e| js_err(e.into()))
}

/// Background-worker side of `getMediaStreamId`: returns the tab to
/// capture. The error message is what goes into the `{ error }` reply.
#[wasm_bindgen]
pub fn requested_tab(request_json: &str) -> Result<u32, JsError> {
    let request: ExtensionRequest =
        serde_json::from_str(request_json).map_err(|e| js_err(e.into()))?;
    capture::requested_tab(&request).map_err(|e| js_err(e.into()))
}

/// Background-worker reply to `getMediaStreamId`, built from the
/// `tabCapture` callback's stream id and `chrome.runtime.lastError?.message`.
#[wasm_bindgen]
pub fn stream_id_reply(
    stream_id: Option<String>,
    last_error: Option<String>,
) -> Result<String, JsError> {
    stream_reply(stream_id, last_error).map_err(js_err)
}

/// Capture-script side of the reply: the stream id, or the worker's error
/// as the thrown message.
#[wasm_bindgen]
pub fn stream_id_from_reply(reply_json: &str) -> Result<String, JsError> {
    stream_id_from(reply_json).map_err(js_err)
}

/// Outcome JSON the capture script returns to the popup. `error` is `None`
/// on success. Pass the result of [`caught_error_message`] from a `catch`.
#[wasm_bindgen]
pub fn capture_outcome_json(error: Option<String>) -> Result<String, JsError> {
    let result = match error {
        Some(message) => Err(CaptureError::Denied(message)),
        None => Ok(()),
    };
    outcome_json(result).map_err(js_err)
}

/// Outcome JSON for a browser without Document Picture-in-Picture.
#[wasm_bindgen]
pub fn capture_unsupported_json() -> Result<String, JsError> {
    outcome_json(Err(CaptureError::Unsupported)).map_err(js_err)
}

/// Message for a caught value: pass `e.message` for `Error` objects and
/// `undefined` for anything else.
#[wasm_bindgen]
pub fn caught_error_message(message: Option<String>) -> String {
    capture::caught_message(message)
}

/// Popup side: the message to show for the script's outcome, or `None` when
/// the PiP window opened. Pass `undefined` when the script returned nothing.
#[wasm_bindgen]
pub fn capture_outcome_message(outcome_json: Option<String>) -> Result<Option<String>, JsError> {
    outcome_message(outcome_json.as_deref()).map_err(js_err)
}

/// Popup message when injecting or running the capture script threw.
#[wasm_bindgen]
pub fn capture_failed_message(message: Option<String>) -> String {
    CaptureError::Failed(capture::caught_message(message)).to_string()
}

/// Stop every track of the captured stream. Call on the PiP window's
/// `pagehide` so the browser's capture indicator goes away.
#[wasm_bindgen]
pub fn stop_tracks(stream: &web_sys::MediaStream) {
    for value in stream.get_tracks().iter() {
        if let Ok(track) = value.dyn_into::<web_sys::MediaStreamTrack>() {
            track.stop();
        }
    }
}
